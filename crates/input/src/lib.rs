//! Terminal input module (engine-facing).
//!
//! This crate plays the role of the button sampler. It maps `crossterm` key
//! events onto the four game buttons, tracks which are held (including on
//! terminals that never report key releases), and hands the engine one
//! validated [`crate::types::Intents`] per tick.

pub mod handler;
pub mod map;

pub use fallblock_types as types;

pub use handler::{validate, ButtonState, IntentSampler};
pub use map::{button_for_key, is_restart, should_quit, Button};
