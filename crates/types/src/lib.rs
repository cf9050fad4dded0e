//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Difficulty Grid Sizes
//!
//! | Difficulty | Rows | Cols | Pairs |
//! |------------|------|------|-------|
//! | Easy       | 4    | 4    | 8     |
//! | Medium     | 4    | 5    | 10    |
//! | Hard       | 5    | 6    | 15    |
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Main loop frame interval (~60 FPS) |
//! | `MATCH_DELAY_MS` | 500 | Delay before a matching pair is confirmed |
//! | `MISMATCH_DELAY_MS` | 1000 | Delay before a mismatched pair flips back |
//! | `WIN_DELAY_MS` | 500 | Delay between the winning match and the summary overlay |
//! | `TIMER_INTERVAL_MS` | 1000 | Display timer refresh interval |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{Difficulty, GameAction, Theme};
//!
//! let difficulty = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(difficulty.config().pair_count, 15);
//!
//! // Unknown names fall back to the defaults.
//! assert_eq!(Difficulty::from_str_or_default("impossible"), Difficulty::Medium);
//! assert_eq!(Theme::from_str_or_default("space"), Theme::Gaming);
//!
//! assert_eq!(GameAction::NewGame.as_str(), "newGame");
//! ```

/// Main loop frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay before two equal cards are marked matched.
pub const MATCH_DELAY_MS: u32 = 500;

/// Delay before two different cards are flipped back face-down.
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Delay between the final match and showing the win summary.
pub const WIN_DELAY_MS: u32 = 500;

/// Display timer refresh interval.
pub const TIMER_INTERVAL_MS: u32 = 1000;

/// Number of symbols in every theme.
pub const THEME_SYMBOL_COUNT: usize = 16;

/// Largest pair count of any difficulty.
pub const MAX_PAIRS: usize = 15;

/// Largest board (hard: 5x6).
pub const MAX_CARDS: usize = MAX_PAIRS * 2;

/// Index of a symbol within the active theme.
pub type SymbolId = u8;

/// Grid shape and pair count for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DifficultyConfig {
    pub rows: u8,
    pub cols: u8,
    pub pair_count: u8,
}

impl DifficultyConfig {
    /// Total number of cards on the board.
    pub fn card_count(&self) -> usize {
        self.pair_count as usize * 2
    }
}

/// Board size selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Grid configuration for this difficulty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::Difficulty;
    ///
    /// let cfg = Difficulty::Easy.config();
    /// assert_eq!((cfg.rows, cfg.cols, cfg.pair_count), (4, 4, 8));
    /// assert_eq!(cfg.card_count(), 16);
    /// ```
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                rows: 4,
                cols: 4,
                pair_count: 8,
            },
            Difficulty::Medium => DifficultyConfig {
                rows: 4,
                cols: 5,
                pair_count: 10,
            },
            Difficulty::Hard => DifficultyConfig {
                rows: 5,
                cols: 6,
                pair_count: 15,
            },
        }
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse difficulty, falling back to the default for unknown names.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// Lowercase name; also the key used in the persisted high-score map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Next difficulty in the cycle easy → medium → hard → easy.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Symbol set used for card faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Gaming,
    Sports,
    Animals,
    Food,
    Nature,
}

const GAMING_SYMBOLS: [char; THEME_SYMBOL_COUNT] = [
    '🎮', '🎯', '🎨', '🎭', '🎪', '🎬', '🎤', '🎧', '🎸', '🎹', '🎺', '🎻', '🥁', '🎲', '🎰', '🎳',
];
const SPORTS_SYMBOLS: [char; THEME_SYMBOL_COUNT] = [
    '🏀', '⚽', '🏈', '⚾', '🎾', '🏐', '🏉', '🎱', '🏓', '🏸', '🥊', '🥋', '🥅', '⛳', '🏁', '🏆',
];
const ANIMAL_SYMBOLS: [char; THEME_SYMBOL_COUNT] = [
    '🐶', '🐱', '🐭', '🐹', '🐰', '🦊', '🐻', '🐼', '🐨', '🐯', '🦁', '🐮', '🐷', '🐸', '🐵', '🐔',
];
const FOOD_SYMBOLS: [char; THEME_SYMBOL_COUNT] = [
    '🍕', '🍔', '🍟', '🌭', '🍿', '🧂', '🥓', '🥚', '🍳', '🧇', '🥞', '🧈', '🍞', '🥐', '🥨', '🥯',
];
// Index 15 repeats index 3; no difficulty draws more than 15 symbols.
const NATURE_SYMBOLS: [char; THEME_SYMBOL_COUNT] = [
    '🌿', '🍀', '🌱', '🌲', '🌳', '🌴', '🌵', '🌾', '🌺', '🌸', '🌻', '🌷', '🌹', '🥀', '🌼', '🌲',
];

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Gaming,
        Theme::Sports,
        Theme::Animals,
        Theme::Food,
        Theme::Nature,
    ];

    /// Ordered symbol set. Boards use the first `pair_count` entries.
    pub fn symbols(&self) -> &'static [char; THEME_SYMBOL_COUNT] {
        match self {
            Theme::Gaming => &GAMING_SYMBOLS,
            Theme::Sports => &SPORTS_SYMBOLS,
            Theme::Animals => &ANIMAL_SYMBOLS,
            Theme::Food => &FOOD_SYMBOLS,
            Theme::Nature => &NATURE_SYMBOLS,
        }
    }

    /// Face glyph for a symbol id, if it is in range.
    pub fn symbol(&self, id: SymbolId) -> Option<char> {
        self.symbols().get(id as usize).copied()
    }

    /// Parse theme from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gaming" => Some(Theme::Gaming),
            "sports" => Some(Theme::Sports),
            "animals" => Some(Theme::Animals),
            "food" => Some(Theme::Food),
            "nature" => Some(Theme::Nature),
            _ => None,
        }
    }

    /// Parse theme, falling back to the default for unknown names.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Gaming => "gaming",
            Theme::Sports => "sports",
            Theme::Animals => "animals",
            Theme::Food => "food",
            Theme::Nature => "nature",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Gaming => Theme::Sports,
            Theme::Sports => Theme::Animals,
            Theme::Animals => Theme::Food,
            Theme::Food => Theme::Nature,
            Theme::Nature => Theme::Gaming,
        }
    }
}

/// Cursor movement direction on the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Game actions that can be applied to modify game state
///
/// These are produced by the input layer (keyboard and mouse) and consumed by
/// the controller. Card clicks are keyed by board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Click the card at the given board position
    ClickCard(u8),
    /// Click the card under the keyboard cursor
    ClickCursor,
    /// Move the keyboard cursor one cell
    MoveCursor(Direction),
    /// Abandon the current board and deal a new one
    NewGame,
    /// Switch difficulty (starts a new game)
    SetDifficulty(Difficulty),
    /// Advance to the next difficulty (starts a new game)
    CycleDifficulty,
    /// Switch theme (starts a new game)
    SetTheme(Theme),
    /// Advance to the next theme (starts a new game)
    CycleTheme,
    /// Toggle and persist the dark-mode preference
    ToggleDarkMode,
    /// Show or hide the statistics panel
    ToggleStats,
    /// Close whichever overlay is showing
    DismissOverlay,
}

impl GameAction {
    /// Convert to camelCase name (for logging)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::ClickCard(_) => "clickCard",
            GameAction::ClickCursor => "clickCursor",
            GameAction::MoveCursor(_) => "moveCursor",
            GameAction::NewGame => "newGame",
            GameAction::SetDifficulty(_) => "setDifficulty",
            GameAction::CycleDifficulty => "cycleDifficulty",
            GameAction::SetTheme(_) => "setTheme",
            GameAction::CycleTheme => "cycleTheme",
            GameAction::ToggleDarkMode => "toggleDarkMode",
            GameAction::ToggleStats => "toggleStats",
            GameAction::DismissOverlay => "dismissOverlay",
        }
    }
}
