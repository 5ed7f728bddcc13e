//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values for the
//! session and [`Control`] values for the application shell.

pub mod map;

pub use threetris_types as types;

pub use map::{handle_key_event, should_quit, Control, KeyAction};
