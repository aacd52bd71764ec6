//! Clean Drops core crate.
//!
//! Drops fall toward a draggable catcher: clean water scores, dirty water
//! pollutes, red obstacles speed everything up. The round rules live in
//! [`session`] and run natively; [`web`] wires them to the page.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod rng;
pub mod session;
pub mod surface;
pub mod web;

pub use config::{Difficulty, DifficultyProfile};
pub use error::GameError;
pub use session::{DropKind, GameController, Outcome, Phase};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web::console::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Bind the page and show the start screen.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::boot().map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn set_sfx_enabled(enabled: bool) {
    web::set_sound_enabled(enabled);
}

/// Names accepted by the difficulty selector.
#[wasm_bindgen]
pub fn difficulty_names() -> Vec<String> {
    Difficulty::ALL.iter().map(|d| d.name().to_string()).collect()
}
