//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids ratatui widgets/layout and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - The view is a pure function of [`core::GameSnapshot`]
//! - Mouse hit-testing uses the same layout the view draws with

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, WIDE_CONTINUATION};
pub use game_view::{AnchorY, BoardLayout, GameView, Palette, Viewport, CARD_GAP, CARD_H, CARD_W};
pub use render_throttle::{fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
