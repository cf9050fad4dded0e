//! Scoring module - best times/moves and aggregate statistics
//!
//! Records are per difficulty and per metric: a finished game can beat the
//! stored best time, the stored best move count, both, or neither. Each axis
//! is compared and updated on its own.
//!
//! The serialized shapes match the persisted JSON blobs:
//! - stats: `{"gamesPlayed":3,"gamesWon":2,"totalMoves":31}`
//! - high scores: `{"easy":{"bestTime":42,"bestMoves":9}}`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

/// Best results for one difficulty. `None` means no finished game yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreRecord {
    #[serde(rename = "bestTime", default, skip_serializing_if = "Option::is_none")]
    pub best_time_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_moves: Option<u32>,
}

/// Which axes a finished game improved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RecordOutcome {
    pub new_best_time: bool,
    pub new_best_moves: bool,
}

impl RecordOutcome {
    pub fn is_new_record(&self) -> bool {
        self.new_best_time || self.new_best_moves
    }
}

/// Fold a finished game into a record, updating each metric independently.
///
/// # Examples
///
/// ```
/// use tui_memory_core::scoring::{update_record, HighScoreRecord};
///
/// let mut rec = HighScoreRecord { best_time_secs: Some(30), best_moves: Some(12) };
///
/// // Slower, but fewer moves: only the move record changes.
/// let outcome = update_record(&mut rec, 45, 10);
/// assert!(!outcome.new_best_time);
/// assert!(outcome.new_best_moves);
/// assert!(outcome.is_new_record());
/// assert_eq!(rec, HighScoreRecord { best_time_secs: Some(30), best_moves: Some(10) });
/// ```
pub fn update_record(record: &mut HighScoreRecord, elapsed_secs: u32, moves: u32) -> RecordOutcome {
    let mut outcome = RecordOutcome::default();

    if record.best_time_secs.map_or(true, |best| elapsed_secs < best) {
        record.best_time_secs = Some(elapsed_secs);
        outcome.new_best_time = true;
    }
    if record.best_moves.map_or(true, |best| moves < best) {
        record.best_moves = Some(moves);
        outcome.new_best_moves = true;
    }

    outcome
}

/// Per-difficulty records keyed by difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores(BTreeMap<String, HighScoreRecord>);

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record, or an empty one.
    pub fn get(&self, difficulty: Difficulty) -> HighScoreRecord {
        self.0
            .get(difficulty.as_str())
            .copied()
            .unwrap_or_default()
    }

    /// Fold a finished game into the difficulty's record.
    pub fn submit(&mut self, difficulty: Difficulty, elapsed_secs: u32, moves: u32) -> RecordOutcome {
        let mut record = self.get(difficulty);
        let outcome = update_record(&mut record, elapsed_secs, moves);
        if outcome.is_new_record() {
            self.0.insert(difficulty.as_str().to_string(), record);
        }
        outcome
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lifetime counters across all sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub total_moves: u64,
}

impl AggregateStats {
    /// Count the session as played unless it already was.
    ///
    /// Returns true if the counter changed.
    pub fn mark_played(&mut self, counted: &mut bool) -> bool {
        if *counted {
            return false;
        }
        *counted = true;
        self.games_played = self.games_played.saturating_add(1);
        true
    }

    /// Record a won session.
    pub fn record_win(&mut self, moves: u32, counted: &mut bool) {
        self.mark_played(counted);
        self.games_won = self.games_won.saturating_add(1);
        self.total_moves = self.total_moves.saturating_add(moves as u64);
    }

    /// Rounded win percentage; 0 when nothing has been played.
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        ((self.games_won as f64 / self.games_played as f64) * 100.0).round() as u32
    }
}

/// Completion percentage shown in the progress bar.
pub fn progress_percent(matched_pairs: u8, pair_count: u8) -> u8 {
    if pair_count == 0 {
        return 0;
    }
    ((matched_pairs as f64 / pair_count as f64) * 100.0).round() as u8
}
