//! Sweetheart Card core crate.
//!
//! An animated proposal card for the browser: a fake loading bar, a card
//! reveal with hearts drifting in the background, an "ask" screen whose decline
//! button runs away from the pointer, and a confetti celebration on success.
//!
//! The engines (`ambient`, `evasion`, `particles`, `loading`, `screen`) are
//! plain Rust with no browser types and are exercised natively by the tests.
//! The `card` module wires them to canvases, timers and input in the browser.

use wasm_bindgen::prelude::*;

pub mod ambient;
pub mod config;
pub mod evasion;
pub mod loading;
pub mod particles;
pub mod random;
pub mod screen;

mod card;

pub use card::{
    accept_scale, celebrate, go_to_ask, loading_progress, particle_count, start_card, stop_card,
};
#[cfg(feature = "serde_json")]
pub use card::start_card_with_config;
pub use config::CardConfig;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
