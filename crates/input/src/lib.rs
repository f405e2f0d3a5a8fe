//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`]s.
//! Each key press is one discrete command; held keys rely on the terminal's
//! own auto-repeat.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, pointer_press, should_quit};
