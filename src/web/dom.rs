//! DOM rendering surface: drop elements, HUD bars, overlays, toast, confetti.
//!
//! Element ids match the page markup (`#play`, `#canWrap`, `#score`, ...).

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{
    BOOST_BADGE_MS, DEFAULT_CATCHER_WIDTH, HIT_FEEDBACK_MS, QUALITY_FEEDBACK_MS,
};
use crate::error::GameError;
use crate::session::{DropKind, DropSpec};
use crate::surface::{DropId, Hud, Rect, Screen, Surface};

const CONFETTI: &[&str] = &["🎉", "✨", "💛", "💧", "🎊"];
const CONFETTI_PIECES: usize = 36;

pub struct DomSurface {
    doc: Document,
    play: HtmlElement,
    can_wrap: HtmlElement,
    can: HtmlElement,
    phone: Option<Element>,
    score: HtmlElement,
    score_center: HtmlElement,
    time_fill: HtmlElement,
    clean_fill: HtmlElement,
    dirty_fill: HtmlElement,
    clean_pct: HtmlElement,
    dirty_pct: HtmlElement,
    quality_bar: HtmlElement,
    start: HtmlElement,
    backdrop: HtmlElement,
    people_num: HtmlElement,
    boost_badge: Option<HtmlElement>,
    toast: Option<HtmlElement>,
    drops: HashMap<DropId, HtmlElement>,
    next_id: u32,
}

pub(crate) fn element(doc: &Document, id: &'static str) -> Result<HtmlElement, GameError> {
    optional(doc, id).ok_or(GameError::MissingElement(id))
}

pub(crate) fn optional(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn set_style(el: &HtmlElement, name: &str, value: &str) {
    if let Err(e) = el.style().set_property(name, value) {
        log::warn!("style {name}={value} rejected: {e:?}");
    }
}

/// Run `f` once after `ms` milliseconds.
pub(crate) fn after(ms: u32, f: impl FnOnce() + 'static) {
    let Some(win) = web_sys::window() else { return };
    let cb = Closure::once_into_js(f);
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        ms as i32,
    ) {
        log::warn!("setTimeout failed: {e:?}");
    }
}

/// Add `classes` now and take them off again after `ms`.
fn flash_classes(el: &HtmlElement, classes: &'static [&'static str], ms: u32) {
    let list = el.class_list();
    for c in classes {
        list.add_1(c).ok();
    }
    let el = el.clone();
    after(ms, move || {
        let list = el.class_list();
        for c in classes {
            list.remove_1(c).ok();
        }
    });
}

impl DomSurface {
    pub fn bind(doc: &Document) -> Result<Self, GameError> {
        Ok(Self {
            doc: doc.clone(),
            play: element(doc, "play")?,
            can_wrap: element(doc, "canWrap")?,
            can: element(doc, "can")?,
            phone: doc.query_selector(".phone")?,
            score: element(doc, "score")?,
            score_center: element(doc, "scoreCenter")?,
            time_fill: element(doc, "timeFill")?,
            clean_fill: element(doc, "cleanFill")?,
            dirty_fill: element(doc, "dirtyFill")?,
            clean_pct: element(doc, "cleanPct")?,
            dirty_pct: element(doc, "dirtyPct")?,
            quality_bar: element(doc, "qualityBar")?,
            start: element(doc, "start")?,
            backdrop: element(doc, "backdrop")?,
            people_num: element(doc, "peopleNum")?,
            boost_badge: optional(doc, "boostBadge"),
            toast: optional(doc, "toast"),
            drops: HashMap::new(),
            next_id: 0,
        })
    }

    pub fn catcher(&self) -> &HtmlElement {
        &self.can_wrap
    }

    fn create_drop(&self, id: DropId, spec: &DropSpec) -> Result<HtmlElement, GameError> {
        let el: HtmlElement = self.doc.create_element("i")?.dyn_into().map_err(JsValue::from)?;
        el.set_class_name(&format!("drop {}", spec.kind.class_name()));
        el.set_attribute("data-type", spec.kind.class_name())?;
        let size = format!("{}px", spec.size);
        set_style(&el, "width", &size);
        set_style(&el, "height", &size);
        set_style(&el, "left", &format!("{}px", spec.x));
        set_style(&el, "--h", &size);
        set_style(&el, "animation", &format!("fall {}s linear forwards", spec.fall_secs));

        let on_end = Closure::once_into_js(move |_evt: web_sys::Event| {
            super::with_game(|game| game.on_fall_complete(id));
        });
        el.add_event_listener_with_callback("animationend", on_end.unchecked_ref())?;
        self.play.append_child(&el)?;
        Ok(el)
    }

    fn burst_confetti(&self) -> Result<(), GameError> {
        let body = self.doc.body().ok_or(GameError::MissingElement("body"))?;
        for i in 0..CONFETTI_PIECES {
            let piece: HtmlElement =
                self.doc.create_element("span")?.dyn_into().map_err(JsValue::from)?;
            piece.set_class_name("confetti");
            piece.set_text_content(Some(CONFETTI[i % CONFETTI.len()]));
            set_style(&piece, "left", &format!("{}vw", js_sys::Math::random() * 92.0));
            set_style(
                &piece,
                "animation-duration",
                &format!("{}ms", 900.0 + js_sys::Math::random() * 700.0),
            );
            set_style(&piece, "font-size", &format!("{}px", 16.0 + js_sys::Math::random() * 16.0));
            let done = piece.clone();
            let on_end = Closure::once_into_js(move |_evt: web_sys::Event| done.remove());
            piece.add_event_listener_with_callback("animationend", on_end.unchecked_ref())?;
            body.append_child(&piece)?;
        }
        Ok(())
    }
}

impl Surface for DomSurface {
    fn play_area(&self) -> Rect {
        let mut r = rect_of(&self.play);
        r.width = f64::from(self.play.client_width());
        r
    }

    fn catcher_bounds(&self) -> Rect {
        let mut r = rect_of(&self.can_wrap);
        if r.width <= 0.0 {
            r.width = match self.can_wrap.offset_width() {
                0 => DEFAULT_CATCHER_WIDTH,
                w => f64::from(w),
            };
        }
        r
    }

    fn drop_bounds(&self, id: DropId) -> Option<Rect> {
        self.drops.get(&id).map(|el| rect_of(el))
    }

    fn spawn_drop(&mut self, spec: &DropSpec) -> Option<DropId> {
        let id = DropId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        match self.create_drop(id, spec) {
            Ok(el) => {
                self.drops.insert(id, el);
                Some(id)
            }
            Err(e) => {
                log::error!("could not spawn drop: {e}");
                None
            }
        }
    }

    fn remove_drop(&mut self, id: DropId) {
        if let Some(el) = self.drops.remove(&id) {
            el.remove();
        }
    }

    fn clear_drops(&mut self) {
        self.drops.clear();
        self.play.set_inner_html("");
    }

    fn freeze_drops(&mut self) {
        for el in self.drops.values() {
            set_style(el, "animation-play-state", "paused");
        }
    }

    fn set_catcher_x(&mut self, x: f64) {
        // The catcher is positioned inside `.phone`, not the play area.
        let offset = self
            .phone
            .as_ref()
            .map(|phone| rect_of(&self.play).left - rect_of(phone).left)
            .unwrap_or(0.0);
        set_style(&self.can_wrap, "left", &format!("{}px", x + offset));
        set_style(&self.can_wrap, "right", "auto");
        set_style(&self.can_wrap, "position", "absolute");
    }

    fn render_hud(&mut self, hud: &Hud) {
        set_style(&self.time_fill, "width", &format!("{}%", hud.time_pct));
        set_style(&self.clean_fill, "width", &format!("{}%", hud.clean_pct));
        set_style(&self.dirty_fill, "width", &format!("{}%", hud.dirty_pct));
        self.clean_pct.set_text_content(Some(&format!("{}%", hud.clean_pct)));
        self.dirty_pct.set_text_content(Some(&format!("{}%", hud.dirty_pct)));
        self.score.set_text_content(Some(&hud.score.to_string()));
    }

    fn feedback(&mut self, kind: DropKind) {
        match kind {
            DropKind::Clean => {
                flash_classes(&self.can, &["hit"], HIT_FEEDBACK_MS);
                flash_classes(&self.score_center, &["pop"], HIT_FEEDBACK_MS);
            }
            DropKind::Dirty => {
                flash_classes(&self.quality_bar, &["shake", "flash"], QUALITY_FEEDBACK_MS);
            }
            DropKind::Obstacle => {
                if let Some(badge) = &self.boost_badge {
                    set_style(badge, "display", "block");
                    let badge = badge.clone();
                    after(BOOST_BADGE_MS, move || set_style(&badge, "display", "none"));
                }
                flash_classes(&self.quality_bar, &["flash", "shake"], QUALITY_FEEDBACK_MS);
            }
        }
    }

    fn toast(&mut self, message: &str, duration_ms: u32) {
        let Some(toast) = &self.toast else { return };
        toast.set_text_content(Some(message));
        flash_classes(toast, &["show"], duration_ms);
    }

    fn show_screen(&mut self, screen: Screen) {
        match screen {
            Screen::Start => {
                set_style(&self.backdrop, "display", "none");
                set_style(&self.start, "display", "flex");
            }
            Screen::Playing => {
                set_style(&self.backdrop, "display", "none");
                set_style(&self.start, "display", "none");
            }
            Screen::Summary { people } => {
                self.people_num.set_text_content(Some(&format!("{people} People!")));
                set_style(&self.backdrop, "display", "flex");
            }
        }
    }

    fn celebrate(&mut self) {
        if let Err(e) = self.burst_confetti() {
            log::warn!("confetti failed: {e}");
        }
    }
}
