//! Render-ready copy of the visible game state.
//!
//! The view draws only from a [`GameSnapshot`]; callers keep one around and
//! refill it with `snapshot_into` each frame.

use arrayvec::ArrayVec;

use crate::scoring::{progress_percent, AggregateStats, HighScoreRecord};
use crate::session::Phase;
use crate::types::{Difficulty, SymbolId, Theme, MAX_CARDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardSnapshot {
    pub symbol: SymbolId,
    pub face_up: bool,
    pub matched: bool,
}

/// Result of a finished game, shown in the win overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinSummary {
    pub difficulty: Difficulty,
    pub elapsed_secs: u32,
    pub moves: u32,
    pub new_best_time: bool,
    pub new_best_moves: bool,
}

impl WinSummary {
    pub fn is_new_record(&self) -> bool {
        self.new_best_time || self.new_best_moves
    }
}

/// Modal panel drawn over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overlay {
    #[default]
    None,
    Stats,
    WinSummary(WinSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cards: ArrayVec<CardSnapshot, MAX_CARDS>,
    pub rows: u8,
    pub cols: u8,
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub phase: Phase,
    pub episode_id: u32,
    pub moves: u32,
    pub matched_pairs: u8,
    pub pair_count: u8,
    pub elapsed_secs: u32,
    pub locked: bool,
    pub cursor: u8,
    pub dark_mode: bool,
    pub overlay: Overlay,
    pub best: HighScoreRecord,
    pub stats: AggregateStats,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.rows = 0;
        self.cols = 0;
        self.difficulty = Difficulty::default();
        self.theme = Theme::default();
        self.phase = Phase::Idle;
        self.episode_id = 0;
        self.moves = 0;
        self.matched_pairs = 0;
        self.pair_count = 0;
        self.elapsed_secs = 0;
        self.locked = false;
        self.cursor = 0;
        self.dark_mode = false;
        self.overlay = Overlay::None;
        self.best = HighScoreRecord::default();
        self.stats = AggregateStats::default();
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.matched_pairs, self.pair_count)
    }

    /// Whether a click could change the board right now.
    pub fn playable(&self) -> bool {
        !self.locked && self.phase != Phase::Won
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cards: ArrayVec::new(),
            rows: 0,
            cols: 0,
            difficulty: Difficulty::default(),
            theme: Theme::default(),
            phase: Phase::Idle,
            episode_id: 0,
            moves: 0,
            matched_pairs: 0,
            pair_count: 0,
            elapsed_secs: 0,
            locked: false,
            cursor: 0,
            dark_mode: false,
            overlay: Overlay::None,
            best: HighScoreRecord::default(),
            stats: AggregateStats::default(),
        }
    }
}
