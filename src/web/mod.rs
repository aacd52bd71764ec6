//! Browser glue: binds the page's controls to a [`GameController`] built from
//! the DOM surface, `<audio>` sound bank and `setInterval` scheduler.
//!
//! The controller lives in a thread-local slot. Every JS callback (buttons,
//! pointer, intervals, animation ends) borrows it for exactly one call.

mod audio;
pub mod console;
mod dom;
mod timers;

pub use audio::{SoundBank, set_sound_enabled, sound_enabled};
pub use dom::DomSurface;
pub use timers::IntervalScheduler;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlInputElement, window};

use crate::config::Difficulty;
use crate::error::GameError;
use crate::rng::SeededRandom;
use crate::session::GameController;

pub type WebGame = GameController<DomSurface, SoundBank, IntervalScheduler, SeededRandom>;

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

/// Run `f` against the live game, if any. Events that arrive while the game is
/// already borrowed are dropped.
pub(crate) fn with_game(f: impl FnOnce(&mut WebGame)) {
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(game) = slot.as_mut() {
                f(game);
            }
        }
        Err(_) => log::warn!("game busy; dropping re-entrant event"),
    });
}

pub fn is_booted() -> bool {
    GAME.with(|cell| cell.try_borrow().map_or(true, |slot| slot.is_some()))
}

fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), GameError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Difficulty currently ticked on the start screen; `normal` when nothing
/// usable is selected.
fn selected_difficulty(doc: &Document) -> Difficulty {
    let checked = doc
        .query_selector(r#"input[name="difficulty"]:checked"#)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value());
    match checked {
        Some(name) => name.parse::<Difficulty>().unwrap_or_else(|e| {
            log::warn!("{e}; falling back to normal");
            Difficulty::Normal
        }),
        None => Difficulty::Normal,
    }
}

/// Bind the page once. Later calls leave the running game and its listeners
/// alone.
pub fn boot() -> Result<(), GameError> {
    if is_booted() {
        log::warn!("already booted; ignoring");
        return Ok(());
    }
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoWindow)?;

    let surface = DomSurface::bind(&doc)?;
    let catcher: EventTarget = surface.catcher().clone().into();
    let sound = SoundBank::load()?;
    let mut game = GameController::new(
        surface,
        sound,
        IntervalScheduler::default(),
        SeededRandom::from_entropy(),
    );
    game.show_menu();
    GAME.with(|cell| cell.replace(Some(game)));

    if let Some(btn) = dom::optional(&doc, "btnStart") {
        for gesture in ["pointerdown", "touchstart", "mousedown"] {
            listen(&btn, gesture, |_: web_sys::Event| with_game(|g| g.sound_mut().prime()))?;
        }
        let doc_start = doc.clone();
        listen(&btn, "click", move |_: web_sys::Event| {
            let difficulty = selected_difficulty(&doc_start);
            with_game(|g| {
                g.sound_mut().prime();
                g.start(difficulty);
            });
        })?;
    }
    if let Some(btn) = dom::optional(&doc, "btnReplay") {
        listen(&btn, "click", |_: web_sys::Event| with_game(|g| g.restart()))?;
    }
    if let Some(btn) = dom::optional(&doc, "btnReset") {
        listen(&btn, "click", |_: web_sys::Event| with_game(|g| g.restart()))?;
    }
    if let Some(btn) = dom::optional(&doc, "btnMenu") {
        listen(&btn, "click", |_: web_sys::Event| with_game(|g| g.show_menu()))?;
    }

    listen(&catcher, "pointerdown", |_: web_sys::PointerEvent| with_game(|g| g.begin_drag()))?;
    listen(&doc, "pointerup", |_: web_sys::PointerEvent| with_game(|g| g.end_drag()))?;
    listen(&doc, "pointermove", |evt: web_sys::PointerEvent| {
        let x = f64::from(evt.client_x());
        with_game(|g| {
            g.drag_to(x);
        });
    })?;

    log::info!("clean drops ready");
    Ok(())
}
