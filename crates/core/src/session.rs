//! Per-game counters and the flip/evaluate phase machine.
//!
//! ```text
//! Idle --flip--> OneFlipped --flip--> Evaluating --resolve--> Idle
//!                                          |
//!                                          +--last pair--> Won
//! ```

use arrayvec::ArrayVec;

use crate::snapshot::WinSummary;

/// Where the current session is in the flip cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    OneFlipped,
    Evaluating,
    Won,
}

/// Mutable state of one play-through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSession {
    pub(crate) moves: u32,
    pub(crate) matched_pairs: u8,
    pub(crate) started_at: Option<u64>,
    pub(crate) elapsed_secs: u32,
    /// Set while two face-up cards wait for their scheduled resolution.
    pub(crate) locked: bool,
    pub(crate) pending: ArrayVec<u8, 2>,
    pub(crate) phase: Phase,
    /// Whether this session already counted toward `games_played`.
    pub(crate) counted: bool,
    /// Filled in when the last pair is matched.
    pub(crate) summary: Option<WinSummary>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn counted(&self) -> bool {
        self.counted
    }

    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Register a face-up card. Returns the pair once two are pending.
    pub(crate) fn push_flip(&mut self, position: u8) -> Option<(u8, u8)> {
        if self.pending.try_push(position).is_err() {
            return None;
        }
        if let &[first, second] = self.pending.as_slice() {
            self.moves = self.moves.saturating_add(1);
            self.locked = true;
            self.phase = Phase::Evaluating;
            Some((first, second))
        } else {
            self.phase = Phase::OneFlipped;
            None
        }
    }

    /// Finish an evaluation. Returns true when this completed the board.
    pub(crate) fn resolve(&mut self, matched: bool, pair_count: u8) -> bool {
        self.pending.clear();
        self.locked = false;
        if matched {
            self.matched_pairs = self.matched_pairs.saturating_add(1);
            if self.matched_pairs >= pair_count {
                self.phase = Phase::Won;
                return true;
            }
        }
        self.phase = Phase::Idle;
        false
    }
}
