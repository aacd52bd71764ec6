//! Sound effects over `<audio>` elements.
//!
//! Playback is best effort: browsers reject `play()` until the page has seen
//! a user gesture, so every rejection is logged and otherwise ignored.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::error::GameError;
use crate::surface::{Cue, SoundPlayer};

thread_local! {
    static SFX_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Page-wide sound switch. Outlives any one [`SoundBank`] and may be flipped
/// before the game is booted.
pub fn sound_enabled() -> bool {
    SFX_ENABLED.with(Cell::get)
}

pub fn set_sound_enabled(enabled: bool) {
    SFX_ENABLED.with(|flag| flag.set(enabled));
    log::info!("[SFX] sound {}", if enabled { "on" } else { "off" });
}

/// Cues whose clip has played through once under a user gesture.
#[derive(Clone, Debug, Default)]
pub(crate) struct Unlocked(Rc<RefCell<HashSet<Cue>>>);

impl Unlocked {
    pub(crate) fn mark(&self, cue: Cue) {
        self.0.borrow_mut().insert(cue);
    }

    /// Cues still waiting for a successful unlock, in [`Cue::ALL`] order.
    pub(crate) fn locked(&self) -> Vec<Cue> {
        let done = self.0.borrow();
        Cue::ALL.into_iter().filter(|cue| !done.contains(cue)).collect()
    }
}

pub struct SoundBank {
    clips: HashMap<Cue, HtmlAudioElement>,
    unlocked: Unlocked,
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl SoundBank {
    pub fn load() -> Result<Self, GameError> {
        let mut clips = HashMap::new();
        for cue in Cue::ALL {
            let audio = HtmlAudioElement::new_with_src(cue.asset_path())?;
            audio.set_preload("auto");
            audio.set_volume(cue.volume());

            let src = cue.asset_path();
            let on_error = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
                log::error!("[SFX] load error for {cue:?}: {src}");
            }) as Box<dyn FnMut(_)>);
            audio.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
            on_error.forget();

            clips.insert(cue, audio);
        }
        let on_reject = Closure::wrap(Box::new(|err: JsValue| {
            log::warn!("[SFX] play blocked/rejected: {err:?}");
        }) as Box<dyn FnMut(JsValue)>);
        Ok(Self { clips, unlocked: Unlocked::default(), on_reject })
    }

    /// Unlock playback on autoplay-restricted browsers: play each clip muted
    /// from inside a user gesture, then rewind it. Clips whose attempt was
    /// rejected are unmuted again and retried on the next gesture.
    pub fn prime(&mut self) {
        for cue in self.unlocked.locked() {
            let Some(audio) = self.clips.get(&cue) else { continue };
            audio.set_muted(true);
            let promise = match audio.play() {
                Ok(promise) => promise,
                Err(e) => {
                    audio.set_muted(false);
                    log::warn!("[SFX] unlock exception for {cue:?}: {e:?}");
                    continue;
                }
            };

            let clip = audio.clone();
            let unlocked = self.unlocked.clone();
            let rewind = Closure::once(move |_: JsValue| {
                clip.pause().ok();
                clip.set_current_time(0.0);
                clip.set_muted(false);
                unlocked.mark(cue);
            });
            let clip = audio.clone();
            let restore = Closure::once(move |err: JsValue| {
                clip.set_muted(false);
                log::warn!("[SFX] unlock of {cue:?} rejected: {err:?}");
            });
            let _ = promise.then2(&rewind, &restore);
            rewind.forget();
            restore.forget();
        }
    }
}

impl SoundPlayer for SoundBank {
    fn play(&mut self, cue: Cue) {
        if !sound_enabled() {
            return;
        }
        let Some(audio) = self.clips.get(&cue) else { return };
        audio.set_current_time(0.0);
        match audio.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_reject);
            }
            Err(e) => log::warn!("[SFX] play exception for {cue:?}: {e:?}"),
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        set_sound_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        sound_enabled()
    }
}
