//! Board module - dealt cards and the pairing invariant
//!
//! A board is an ordered run of `2 * pair_count` cards stored inline. Positions
//! are row-major over the difficulty's grid. Every symbol on a freshly dealt
//! board appears exactly twice.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{DifficultyConfig, SymbolId, Theme, MAX_CARDS, THEME_SYMBOL_COUNT};

/// One card on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub symbol: SymbolId,
    pub position: u8,
    pub flipped: bool,
    pub matched: bool,
}

impl Card {
    pub fn new(symbol: SymbolId, position: u8) -> Self {
        Self {
            symbol,
            position,
            flipped: false,
            matched: false,
        }
    }

    /// Face-down and still in play.
    pub fn is_selectable(&self) -> bool {
        !self.flipped && !self.matched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{requested} pairs requested but the theme only has {available} symbols")]
    NotEnoughSymbols { requested: usize, available: usize },
    #[error("{requested} cards requested but a board holds at most {capacity}")]
    TooManyCards { requested: usize, capacity: usize },
}

/// The dealt cards for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: DifficultyConfig,
    cards: ArrayVec<Card, MAX_CARDS>,
}

impl Board {
    /// Deal a new shuffled board.
    ///
    /// Takes the first `pair_count` symbols of the theme, duplicates them and
    /// shuffles the result.
    pub fn generate(
        config: DifficultyConfig,
        theme: Theme,
        rng: &mut SimpleRng,
    ) -> Result<Self, BoardError> {
        let mut symbols = Self::paired_symbols(config, theme)?;
        rng.shuffle(&mut symbols);
        Ok(Self::from_symbols(config, &symbols))
    }

    /// Unshuffled symbol sequence `[0, 0, 1, 1, ...]` for a config.
    fn paired_symbols(
        config: DifficultyConfig,
        theme: Theme,
    ) -> Result<ArrayVec<SymbolId, MAX_CARDS>, BoardError> {
        let pairs = config.pair_count as usize;
        let available = theme.symbols().len().min(THEME_SYMBOL_COUNT);
        if pairs > available {
            return Err(BoardError::NotEnoughSymbols {
                requested: pairs,
                available,
            });
        }
        if pairs * 2 > MAX_CARDS {
            return Err(BoardError::TooManyCards {
                requested: pairs * 2,
                capacity: MAX_CARDS,
            });
        }

        let mut out = ArrayVec::new();
        for id in 0..pairs as SymbolId {
            out.push(id);
            out.push(id);
        }
        Ok(out)
    }

    /// Build a board with a fixed layout (no shuffle).
    ///
    /// Extra symbols beyond the board capacity are ignored.
    pub fn from_symbols(config: DifficultyConfig, symbols: &[SymbolId]) -> Self {
        let cards = symbols
            .iter()
            .take(MAX_CARDS)
            .enumerate()
            .map(|(i, &s)| Card::new(s, i as u8))
            .collect();
        Self { config, cards }
    }

    pub fn config(&self) -> DifficultyConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> u8 {
        self.config.pair_count
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, position: u8) -> Option<&Card> {
        self.cards.get(position as usize)
    }

    fn get_mut(&mut self, position: u8) -> Option<&mut Card> {
        self.cards.get_mut(position as usize)
    }

    /// Turn a card face-up. Returns false when it is not selectable.
    pub fn flip(&mut self, position: u8) -> bool {
        match self.get_mut(position) {
            Some(card) if card.is_selectable() => {
                card.flipped = true;
                true
            }
            _ => false,
        }
    }

    /// Turn a card face-down again (mismatch resolution).
    pub fn unflip(&mut self, position: u8) {
        if let Some(card) = self.get_mut(position) {
            if !card.matched {
                card.flipped = false;
            }
        }
    }

    pub fn mark_matched(&mut self, position: u8) {
        if let Some(card) = self.get_mut(position) {
            card.flipped = true;
            card.matched = true;
        }
    }

    /// Whether the two positions hold the same symbol.
    pub fn symbols_match(&self, a: u8, b: u8) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) => a != b && x.symbol == y.symbol,
            _ => false,
        }
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    /// Check the pairing invariant: `2 * pair_count` cards, each symbol twice.
    pub fn is_perfect_pairing(&self) -> bool {
        if self.cards.len() != self.config.card_count() {
            return false;
        }
        let mut counts = [0u8; MAX_CARDS];
        for card in &self.cards {
            match counts.get_mut(card.symbol as usize) {
                Some(c) => *c += 1,
                None => return false,
            }
        }
        counts
            .iter()
            .take(self.config.pair_count as usize)
            .all(|&c| c == 2)
    }

    /// Row/column of a position in the grid.
    pub fn coords(&self, position: u8) -> (u8, u8) {
        let cols = self.config.cols.max(1);
        (position / cols, position % cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn easy_board(seed: u32) -> Board {
        let mut rng = SimpleRng::new(seed);
        Board::generate(Difficulty::Easy.config(), Theme::Gaming, &mut rng).unwrap()
    }

    #[test]
    fn test_generate_satisfies_pairing() {
        let board = easy_board(1);
        assert_eq!(board.len(), 16);
        assert!(board.is_perfect_pairing());
        for (i, card) in board.cards().iter().enumerate() {
            assert_eq!(card.position as usize, i);
            assert!(card.is_selectable());
        }
    }

    #[test]
    fn test_generate_uses_first_symbols() {
        let board = easy_board(5);
        assert!(board.cards().iter().all(|c| (c.symbol as usize) < 8));
    }

    #[test]
    fn test_generate_rejects_oversized_config() {
        let cfg = DifficultyConfig {
            rows: 4,
            cols: 5,
            pair_count: 17,
        };
        let mut rng = SimpleRng::new(1);
        let err = Board::generate(cfg, Theme::Food, &mut rng).unwrap_err();
        assert_eq!(
            err,
            BoardError::NotEnoughSymbols {
                requested: 17,
                available: 16
            }
        );
    }

    #[test]
    fn test_flip_and_unflip() {
        let mut board = easy_board(3);
        assert!(board.flip(0));
        assert!(!board.flip(0), "already face-up");
        assert!(board.get(0).unwrap().flipped);

        board.unflip(0);
        assert!(!board.get(0).unwrap().flipped);
        assert!(!board.flip(99));
    }

    #[test]
    fn test_matched_cards_stay_face_up() {
        let cfg = Difficulty::Easy.config();
        let mut board = Board::from_symbols(cfg, &[0, 0, 1, 1]);
        board.mark_matched(0);
        board.unflip(0);
        let card = board.get(0).unwrap();
        assert!(card.flipped && card.matched);
        assert!(!board.flip(0));
        assert_eq!(board.matched_count(), 1);
    }

    #[test]
    fn test_symbols_match() {
        let board = Board::from_symbols(Difficulty::Easy.config(), &[3, 1, 3, 1]);
        assert!(board.symbols_match(0, 2));
        assert!(!board.symbols_match(0, 1));
        assert!(!board.symbols_match(0, 0), "same card is not a pair");
        assert!(!board.symbols_match(0, 40));
    }

    #[test]
    fn test_pairing_detects_broken_boards() {
        let cfg = DifficultyConfig {
            rows: 1,
            cols: 4,
            pair_count: 2,
        };
        assert!(Board::from_symbols(cfg, &[0, 1, 1, 0]).is_perfect_pairing());
        assert!(!Board::from_symbols(cfg, &[0, 0, 0, 1]).is_perfect_pairing());
        assert!(!Board::from_symbols(cfg, &[0, 0, 1]).is_perfect_pairing());
    }

    #[test]
    fn test_coords_are_row_major() {
        let board = easy_board(1);
        assert_eq!(board.coords(0), (0, 0));
        assert_eq!(board.coords(5), (1, 1));
        assert_eq!(board.coords(15), (3, 3));
    }
}
