//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and persistence
//! plumbing for the memory (card-pairs) game. It has **no dependencies** on a
//! terminal, a filesystem or the wall clock; those arrive through the
//! [`Clock`] and [`KeyValueStore`] traits, making it:
//!
//! - **Deterministic**: Same seed produces the same deal; time only moves when the clock does
//! - **Testable**: Every delayed transition can be stepped with [`ManualClock`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: dealt cards and the pairing invariant
//! - [`clock`]: time sources and the one-second display timer
//! - [`controller`]: [`GameController`], the command interface and lifecycle
//! - [`persist`]: key-value store trait and the typed persistence adapter
//! - [`rng`]: seedable RNG and unbiased Fisher-Yates shuffle
//! - [`scheduler`]: cancellable delayed transitions
//! - [`scoring`]: per-difficulty records and aggregate statistics
//! - [`session`]: per-game counters and the flip/evaluate phases
//! - [`snapshot`]: render-ready copy of the game state
//!
//! # Game Rules
//!
//! - Flip two face-down cards per move; the first flip of a game starts the clock
//! - A matching pair is confirmed after 500ms, a mismatch flips back after 1000ms
//! - Input is locked while a pair is being evaluated
//! - Clearing the board records time and moves, each against its own best
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{GameController, ManualClock, MemoryStore, Persistence, Phase};
//! use tui_memory_types::{Difficulty, Theme, MATCH_DELAY_MS};
//!
//! let clock = ManualClock::new(0);
//! let mut game = GameController::new(
//!     Difficulty::Easy,
//!     Theme::Gaming,
//!     12345,
//!     Persistence::new(MemoryStore::new()),
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! // Find both cards carrying symbol 0 and flip them.
//! let pair: Vec<u8> = game
//!     .board()
//!     .cards()
//!     .iter()
//!     .filter(|c| c.symbol == 0)
//!     .map(|c| c.position)
//!     .collect();
//! game.click_card(pair[0]);
//! game.click_card(pair[1]);
//! assert_eq!(game.moves(), 1);
//!
//! clock.advance(MATCH_DELAY_MS as u64);
//! game.tick();
//! assert_eq!(game.matched_pairs(), 1);
//! assert_eq!(game.phase(), Phase::Idle);
//! ```

pub mod board;
pub mod clock;
pub mod controller;
pub mod persist;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Card};
pub use clock::{Clock, DisplayTimer, ManualClock, SystemClock};
pub use controller::{ClickOutcome, GameController, GameEvent, IgnoreReason};
pub use persist::{KeyValueStore, MemoryStore, Persistence, StoreError};
pub use rng::SimpleRng;
pub use scheduler::{ScheduledEvent, Scheduler};
pub use scoring::{AggregateStats, HighScoreRecord, HighScores, RecordOutcome};
pub use session::{GameSession, Phase};
pub use snapshot::{CardSnapshot, GameSnapshot, Overlay, WinSummary};
