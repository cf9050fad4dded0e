//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`].
//! Mouse clicks are resolved to card positions by a caller-supplied hit test,
//! so this crate stays independent of the layout code.

pub mod map;

pub use tui_memory_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit, MouseTarget};
