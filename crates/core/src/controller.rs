//! Game controller - the single owner of a memory game
//!
//! Ties together the board, the session counters, delayed transitions, the
//! display timer and persisted preferences/records. Input arrives as
//! [`GameAction`]s (or direct [`GameController::click_card`] calls); time
//! advances through [`GameController::tick`], which fires whatever scheduled
//! transitions have come due on the injected [`Clock`].

use crate::board::{Board, BoardError};
use crate::clock::{elapsed_secs, Clock, DisplayTimer};
use crate::persist::{KeyValueStore, Persistence};
use crate::rng::SimpleRng;
use crate::scheduler::{ScheduledEvent, Scheduler};
use crate::scoring::{AggregateStats, HighScoreRecord, HighScores};
use crate::session::{GameSession, Phase};
use crate::snapshot::{CardSnapshot, GameSnapshot, Overlay, WinSummary};
use crate::types::*;

/// Why a click did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A pair is being evaluated.
    Locked,
    /// Two cards are already face-up.
    PairPending,
    AlreadyFaceUp,
    AlreadyMatched,
    OutOfRange,
    /// The board is complete.
    GameOver,
}

/// State transition caused by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card turned face-up; the pair resolves after its delay.
    PairPending { matched: bool },
}

impl ClickOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ClickOutcome::Ignored(_))
    }
}

/// Notifications for the presentation layer, drained with
/// [`GameController::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    NewGame { difficulty: Difficulty, theme: Theme },
    CardFlipped { position: u8 },
    PairMatched { first: u8, second: u8 },
    PairReverted { first: u8, second: u8 },
    TimerTick { elapsed_secs: u32 },
    Won(WinSummary),
    WinSummaryShown,
    DarkModeChanged(bool),
}

pub struct GameController<S, C> {
    difficulty: Difficulty,
    theme: Theme,
    board: Board,
    session: GameSession,
    scheduler: Scheduler,
    timer: DisplayTimer,
    rng: SimpleRng,
    clock: C,
    persistence: Persistence<S>,
    stats: AggregateStats,
    high_scores: HighScores,
    dark_mode: bool,
    cursor: u8,
    /// Stats panel, drawn above the win summary when both are up.
    stats_open: bool,
    win_visible: bool,
    /// Increments on every deal.
    episode_id: u32,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore, C: Clock> GameController<S, C> {
    /// Load persisted state and deal the first board.
    pub fn new(
        difficulty: Difficulty,
        theme: Theme,
        seed: u32,
        persistence: Persistence<S>,
        clock: C,
    ) -> Result<Self, BoardError> {
        let mut rng = SimpleRng::new(seed);
        let board = Board::generate(difficulty.config(), theme, &mut rng)?;

        let stats = persistence.load_stats();
        let high_scores = persistence.load_high_scores();
        let dark_mode = persistence.load_dark_mode();

        tracing::info!(
            difficulty = difficulty.as_str(),
            theme = theme.as_str(),
            seed,
            "game controller ready"
        );

        Ok(Self {
            difficulty,
            theme,
            board,
            session: GameSession::new(),
            scheduler: Scheduler::new(),
            timer: DisplayTimer::new(),
            rng,
            clock,
            persistence,
            stats,
            high_scores,
            dark_mode,
            cursor: 0,
            stats_open: false,
            win_visible: false,
            episode_id: 0,
            events: Vec::new(),
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn moves(&self) -> u32 {
        self.session.moves()
    }

    pub fn matched_pairs(&self) -> u8 {
        self.session.matched_pairs()
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Record for the current difficulty.
    pub fn best(&self) -> HighScoreRecord {
        self.high_scores.get(self.difficulty)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Topmost modal.
    pub fn overlay(&self) -> Overlay {
        if self.stats_open {
            return Overlay::Stats;
        }
        match self.session.summary {
            Some(summary) if self.win_visible => Overlay::WinSummary(summary),
            _ => Overlay::None,
        }
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Due time of the next scheduled transition, if any.
    pub fn next_transition_ms(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Take all events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let cfg = self.board.config();

        out.cards.clear();
        out.cards.extend(self.board.cards().iter().map(|c| CardSnapshot {
            symbol: c.symbol,
            face_up: c.flipped || c.matched,
            matched: c.matched,
        }));
        out.rows = cfg.rows;
        out.cols = cfg.cols;
        out.difficulty = self.difficulty;
        out.theme = self.theme;
        out.phase = self.session.phase();
        out.episode_id = self.episode_id;
        out.moves = self.session.moves();
        out.matched_pairs = self.session.matched_pairs();
        out.pair_count = cfg.pair_count;
        out.elapsed_secs = self.session.elapsed_secs();
        out.locked = self.session.is_locked();
        out.cursor = self.cursor;
        out.dark_mode = self.dark_mode;
        out.overlay = self.overlay();
        out.best = self.best();
        out.stats = self.stats;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Abandon the current board and deal a fresh one with the same settings.
    pub fn new_game(&mut self) -> Result<(), BoardError> {
        self.deal(self.difficulty, self.theme)
    }

    /// Switch difficulty and deal.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), BoardError> {
        self.deal(difficulty, self.theme)
    }

    /// Switch theme and deal.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), BoardError> {
        self.deal(self.difficulty, theme)
    }

    fn deal(&mut self, difficulty: Difficulty, theme: Theme) -> Result<(), BoardError> {
        let board = Board::generate(difficulty.config(), theme, &mut self.rng)?;

        // Nothing from the abandoned board may fire into the new one.
        self.timer.stop();
        self.scheduler.cancel_all();

        self.difficulty = difficulty;
        self.theme = theme;
        self.board = board;
        self.session = GameSession::new();
        self.stats_open = false;
        self.win_visible = false;
        self.cursor = self.cursor.min(self.board.len().saturating_sub(1) as u8);
        self.episode_id = self.episode_id.wrapping_add(1);

        tracing::info!(
            episode = self.episode_id,
            difficulty = difficulty.as_str(),
            theme = theme.as_str(),
            "new game"
        );
        self.events.push(GameEvent::NewGame { difficulty, theme });
        Ok(())
    }

    /// Turn the card at `position` face-up if the rules allow it.
    pub fn click_card(&mut self, position: u8) -> ClickOutcome {
        if let Some(reason) = self.click_blocker(position) {
            tracing::trace!(position, ?reason, "click ignored");
            return ClickOutcome::Ignored(reason);
        }

        let now = self.clock.now_ms();
        if self.session.started_at.is_none() {
            self.session.started_at = Some(now);
            self.timer.start(now);
            if self.stats.mark_played(&mut self.session.counted) {
                self.persist_stats();
            }
        }

        self.board.flip(position);
        self.events.push(GameEvent::CardFlipped { position });

        let Some((first, second)) = self.session.push_flip(position) else {
            return ClickOutcome::Flipped;
        };

        let matched = self.board.symbols_match(first, second);
        let (delay, event) = if matched {
            (MATCH_DELAY_MS, ScheduledEvent::ConfirmMatch { first, second })
        } else {
            (MISMATCH_DELAY_MS, ScheduledEvent::RevertMismatch { first, second })
        };
        if !self.scheduler.schedule(now, delay, event) {
            tracing::error!(?event, "transition queue full");
        }
        tracing::debug!(first, second, matched, moves = self.session.moves(), "pair flipped");

        ClickOutcome::PairPending { matched }
    }

    fn click_blocker(&self, position: u8) -> Option<IgnoreReason> {
        if self.session.is_won() {
            return Some(IgnoreReason::GameOver);
        }
        if self.session.is_locked() {
            return Some(IgnoreReason::Locked);
        }
        if self.session.pending().len() >= 2 {
            return Some(IgnoreReason::PairPending);
        }
        let Some(card) = self.board.get(position) else {
            return Some(IgnoreReason::OutOfRange);
        };
        if card.matched {
            return Some(IgnoreReason::AlreadyMatched);
        }
        if card.flipped {
            return Some(IgnoreReason::AlreadyFaceUp);
        }
        None
    }

    /// Fire due transitions and refresh the elapsed-time readout.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let mut changed = false;

        while let Some(event) = self.scheduler.pop_due(now) {
            self.fire(event, now);
            changed = true;
        }

        if let Some(secs) = self.timer.poll(now) {
            if secs != self.session.elapsed_secs {
                self.session.elapsed_secs = secs;
                self.events.push(GameEvent::TimerTick { elapsed_secs: secs });
                changed = true;
            }
        }

        changed
    }

    fn fire(&mut self, event: ScheduledEvent, now: u64) {
        match event {
            ScheduledEvent::ConfirmMatch { first, second } => {
                self.board.mark_matched(first);
                self.board.mark_matched(second);
                let won = self.session.resolve(true, self.board.pair_count());
                self.events.push(GameEvent::PairMatched { first, second });
                if won {
                    self.handle_win(now);
                }
            }
            ScheduledEvent::RevertMismatch { first, second } => {
                self.board.unflip(first);
                self.board.unflip(second);
                self.session.resolve(false, self.board.pair_count());
                self.events.push(GameEvent::PairReverted { first, second });
            }
            ScheduledEvent::ShowWinSummary => {
                if self.session.summary.is_some() {
                    self.win_visible = true;
                    self.events.push(GameEvent::WinSummaryShown);
                }
            }
        }
    }

    fn handle_win(&mut self, now: u64) {
        self.timer.stop();
        let started = self.session.started_at.unwrap_or(now);
        let elapsed = elapsed_secs(started, now);
        let moves = self.session.moves();
        self.session.elapsed_secs = elapsed;

        self.stats.record_win(moves, &mut self.session.counted);
        self.persist_stats();

        let outcome = self.high_scores.submit(self.difficulty, elapsed, moves);
        if outcome.is_new_record() {
            if let Err(e) = self.persistence.save_high_scores(&self.high_scores) {
                tracing::error!(error = %e, "failed to save high scores");
            }
        }

        let summary = WinSummary {
            difficulty: self.difficulty,
            elapsed_secs: elapsed,
            moves,
            new_best_time: outcome.new_best_time,
            new_best_moves: outcome.new_best_moves,
        };
        self.session.summary = Some(summary);

        tracing::info!(
            elapsed,
            moves,
            new_record = summary.is_new_record(),
            "board cleared"
        );
        self.events.push(GameEvent::Won(summary));
        let event = ScheduledEvent::ShowWinSummary;
        if !self.scheduler.schedule(now, WIN_DELAY_MS, event) {
            tracing::error!(?event, "transition queue full");
        }
    }

    /// Summary of the finished game, once the board is cleared.
    pub fn last_summary(&self) -> Option<WinSummary> {
        self.session.summary
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = self.persistence.save_dark_mode(self.dark_mode) {
            tracing::error!(error = %e, "failed to save dark mode preference");
        }
        self.events.push(GameEvent::DarkModeChanged(self.dark_mode));
    }

    fn persist_stats(&mut self) {
        if let Err(e) = self.persistence.save_stats(&self.stats) {
            tracing::error!(error = %e, "failed to save stats");
        }
    }

    /// Move the keyboard cursor, wrapping at the grid edges.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let cfg = self.board.config();
        let (rows, cols) = (cfg.rows.max(1), cfg.cols.max(1));
        let (row, col) = self.board.coords(self.cursor);
        let (row, col) = match direction {
            Direction::Up => ((row + rows - 1) % rows, col),
            Direction::Down => ((row + 1) % rows, col),
            Direction::Left => (row, (col + cols - 1) % cols),
            Direction::Right => (row, (col + 1) % cols),
        };
        let next = row * cols + col;
        if next == self.cursor || next as usize >= self.board.len() {
            return false;
        }
        self.cursor = next;
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::ClickCard(position) => !self.click_card(position).is_ignored(),
            GameAction::ClickCursor => match self.overlay() {
                Overlay::Stats => {
                    self.stats_open = false;
                    true
                }
                // "Play again" from the win summary.
                Overlay::WinSummary(_) => self.deal_or_log(self.difficulty, self.theme),
                Overlay::None => !self.click_card(self.cursor).is_ignored(),
            },
            GameAction::MoveCursor(direction) => self.move_cursor(direction),
            GameAction::NewGame => self.deal_or_log(self.difficulty, self.theme),
            GameAction::SetDifficulty(difficulty) => self.deal_or_log(difficulty, self.theme),
            GameAction::CycleDifficulty => self.deal_or_log(self.difficulty.next(), self.theme),
            GameAction::SetTheme(theme) => self.deal_or_log(self.difficulty, theme),
            GameAction::CycleTheme => self.deal_or_log(self.difficulty, self.theme.next()),
            GameAction::ToggleDarkMode => {
                self.toggle_dark_mode();
                true
            }
            GameAction::ToggleStats => {
                self.stats_open = !self.stats_open;
                true
            }
            GameAction::DismissOverlay => match self.overlay() {
                Overlay::Stats => {
                    self.stats_open = false;
                    true
                }
                Overlay::WinSummary(_) => {
                    self.win_visible = false;
                    true
                }
                Overlay::None => false,
            },
        }
    }

    fn deal_or_log(&mut self, difficulty: Difficulty, theme: Theme) -> bool {
        match self.deal(difficulty, theme) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to deal board");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::persist::{MemoryStore, HIGH_SCORES_KEY, STATS_KEY};

    type TestController = GameController<MemoryStore, ManualClock>;

    fn controller(difficulty: Difficulty) -> (TestController, ManualClock) {
        let clock = ManualClock::new(0);
        let c = GameController::new(
            difficulty,
            Theme::Gaming,
            12345,
            Persistence::new(MemoryStore::new()),
            clock.clone(),
        )
        .unwrap();
        (c, clock)
    }

    /// Positions of the two cards carrying each symbol, in symbol order.
    fn pairs(c: &TestController) -> Vec<(u8, u8)> {
        let mut out = Vec::new();
        for symbol in 0..c.board().pair_count() {
            let pos: Vec<u8> = c
                .board()
                .cards()
                .iter()
                .filter(|card| card.symbol == symbol)
                .map(|card| card.position)
                .collect();
            out.push((pos[0], pos[1]));
        }
        out
    }

    fn mismatched(c: &TestController) -> (u8, u8) {
        let cards = c.board().cards();
        let other = cards
            .iter()
            .find(|card| card.symbol != cards[0].symbol)
            .unwrap();
        (0, other.position)
    }

    #[test]
    fn test_new_controller() {
        let (c, _) = controller(Difficulty::Easy);
        assert_eq!(c.board().len(), 16);
        assert!(c.board().is_perfect_pairing());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.moves(), 0);
        assert_eq!(c.episode_id(), 0);
        assert!(!c.dark_mode());
        assert_eq!(c.overlay(), Overlay::None);
    }

    #[test]
    fn test_first_click_starts_clock_and_counts_game() {
        let (mut c, clock) = controller(Difficulty::Easy);
        clock.set(2_000);
        assert_eq!(c.click_card(0), ClickOutcome::Flipped);
        assert_eq!(c.session().started_at(), Some(2_000));
        assert!(c.session().counted());
        assert_eq!(c.stats().games_played, 1);
        assert_eq!(c.phase(), Phase::OneFlipped);
        assert!(c.persistence().store().get(STATS_KEY).is_some());
    }

    #[test]
    fn test_click_same_card_twice_is_ignored() {
        let (mut c, _) = controller(Difficulty::Easy);
        c.click_card(0);
        assert_eq!(
            c.click_card(0),
            ClickOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(c.moves(), 0);
    }

    #[test]
    fn test_out_of_range_click() {
        let (mut c, _) = controller(Difficulty::Easy);
        assert_eq!(
            c.click_card(16),
            ClickOutcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(c.session().started_at(), None);
    }

    #[test]
    fn test_third_click_while_pending_has_no_effect() {
        let (mut c, _) = controller(Difficulty::Easy);
        let (a, b) = mismatched(&c);
        c.click_card(a);
        c.click_card(b);
        let board_before = c.board().clone();
        let session_before = c.session().clone();

        let third = (0..16u8).find(|&p| p != a && p != b).unwrap();
        assert_eq!(
            c.click_card(third),
            ClickOutcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(c.board(), &board_before);
        assert_eq!(c.session(), &session_before);
    }

    #[test]
    fn test_match_resolves_after_delay() {
        let (mut c, clock) = controller(Difficulty::Easy);
        let (a, b) = pairs(&c)[0];
        c.click_card(a);
        assert_eq!(c.click_card(b), ClickOutcome::PairPending { matched: true });
        assert_eq!(c.moves(), 1);
        assert!(c.session().is_locked());

        clock.advance(MATCH_DELAY_MS as u64 - 1);
        c.tick();
        assert_eq!(c.matched_pairs(), 0);

        clock.advance(1);
        assert!(c.tick());
        assert_eq!(c.matched_pairs(), 1);
        assert_eq!(c.moves(), 1);
        assert!(!c.session().is_locked());
        assert!(c.board().get(a).unwrap().matched);
        assert!(c.board().get(b).unwrap().matched);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let (mut c, clock) = controller(Difficulty::Easy);
        let (a, b) = mismatched(&c);
        c.click_card(a);
        assert_eq!(c.click_card(b), ClickOutcome::PairPending { matched: false });

        clock.advance(MATCH_DELAY_MS as u64);
        c.tick();
        assert!(c.session().is_locked(), "mismatch waits the longer delay");

        clock.advance((MISMATCH_DELAY_MS - MATCH_DELAY_MS) as u64);
        c.tick();
        assert!(!c.session().is_locked());
        assert!(!c.board().get(a).unwrap().flipped);
        assert!(!c.board().get(b).unwrap().flipped);
        assert_eq!(c.matched_pairs(), 0);
        assert_eq!(c.moves(), 1);
    }

    #[test]
    fn test_full_easy_game_wins_once() {
        let (mut c, clock) = controller(Difficulty::Easy);
        for (a, b) in pairs(&c) {
            c.click_card(a);
            c.click_card(b);
            clock.advance(MATCH_DELAY_MS as u64);
            c.tick();
        }

        assert_eq!(c.phase(), Phase::Won);
        assert_eq!(c.moves(), 8);
        assert_eq!(c.matched_pairs(), 8);
        assert_eq!(c.stats().games_won, 1);
        assert_eq!(c.stats().games_played, 1);
        assert_eq!(c.stats().total_moves, 8);

        // Further ticks and clicks change nothing.
        clock.advance(10_000);
        c.tick();
        assert_eq!(c.click_card(0), ClickOutcome::Ignored(IgnoreReason::GameOver));
        assert_eq!(c.stats().games_won, 1);

        let wins = c
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Won(_)))
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_win_records_elapsed_and_shows_summary_later() {
        let (mut c, clock) = controller(Difficulty::Easy);
        clock.set(1_000);
        for (a, b) in pairs(&c) {
            c.click_card(a);
            c.click_card(b);
            clock.advance(MATCH_DELAY_MS as u64);
            c.tick();
        }
        // 8 matches * 500ms after start => 4s.
        let summary = c.last_summary().unwrap();
        assert_eq!(summary.elapsed_secs, 4);
        assert_eq!(summary.moves, 8);
        assert!(summary.new_best_time && summary.new_best_moves);
        assert_eq!(c.overlay(), Overlay::None);

        clock.advance(WIN_DELAY_MS as u64);
        c.tick();
        assert_eq!(c.overlay(), Overlay::WinSummary(summary));

        assert_eq!(c.best().best_time_secs, Some(4));
        assert!(c.persistence().store().get(HIGH_SCORES_KEY).is_some());
    }

    #[test]
    fn test_timer_ticks_update_elapsed() {
        let (mut c, clock) = controller(Difficulty::Easy);
        c.click_card(0);
        clock.advance(1_000);
        assert!(c.tick());
        assert_eq!(c.session().elapsed_secs(), 1);
        clock.advance(2_500);
        c.tick();
        assert_eq!(c.session().elapsed_secs(), 3);
    }

    #[test]
    fn test_new_game_cancels_pending_transitions() {
        let (mut c, clock) = controller(Difficulty::Easy);
        let (a, b) = pairs(&c)[0];
        c.click_card(a);
        c.click_card(b);

        assert!(c.apply_action(GameAction::NewGame));
        assert_eq!(c.moves(), 0);
        assert_eq!(c.matched_pairs(), 0);
        assert!(!c.session().counted());
        assert!(!c.session().is_locked());
        assert_eq!(c.next_transition_ms(), None);

        clock.advance(5_000);
        c.tick();
        assert_eq!(c.matched_pairs(), 0);
        assert!(c.board().cards().iter().all(|card| card.is_selectable()));
        assert_eq!(c.session().elapsed_secs(), 0);
    }

    #[test]
    fn test_abandoned_game_counts_once() {
        let (mut c, _) = controller(Difficulty::Easy);
        c.click_card(0);
        c.apply_action(GameAction::NewGame);
        c.click_card(0);
        c.click_card(1);
        assert_eq!(c.stats().games_played, 2);
        assert_eq!(c.stats().games_won, 0);
    }

    #[test]
    fn test_difficulty_and_theme_changes_redeal() {
        let (mut c, _) = controller(Difficulty::Easy);
        assert!(c.apply_action(GameAction::SetDifficulty(Difficulty::Hard)));
        assert_eq!(c.board().len(), 30);
        assert_eq!(c.episode_id(), 1);

        assert!(c.apply_action(GameAction::CycleTheme));
        assert_eq!(c.theme(), Theme::Sports);
        assert_eq!(c.episode_id(), 2);

        assert!(c.apply_action(GameAction::CycleDifficulty));
        assert_eq!(c.difficulty(), Difficulty::Easy);
        assert!(c.board().is_perfect_pairing());
    }

    #[test]
    fn test_cursor_moves_and_wraps() {
        let (mut c, _) = controller(Difficulty::Medium);
        // 4 rows x 5 cols
        assert!(c.move_cursor(Direction::Left));
        assert_eq!(c.cursor(), 4);
        assert!(c.move_cursor(Direction::Up));
        assert_eq!(c.cursor(), 19);
        assert!(c.move_cursor(Direction::Down));
        assert_eq!(c.cursor(), 4);
        assert!(c.move_cursor(Direction::Right));
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamped_on_smaller_board() {
        let (mut c, _) = controller(Difficulty::Hard);
        assert!(c.move_cursor(Direction::Up));
        assert_eq!(c.cursor(), 24);
        c.apply_action(GameAction::SetDifficulty(Difficulty::Easy));
        assert!(c.cursor() < 16);
    }

    fn win_easy(c: &mut TestController, clock: &ManualClock) {
        for (a, b) in pairs(c) {
            c.click_card(a);
            c.click_card(b);
            clock.advance(MATCH_DELAY_MS as u64);
            c.tick();
        }
    }

    #[test]
    fn test_stats_panel_stacks_over_win_summary() {
        let (mut c, clock) = controller(Difficulty::Easy);
        win_easy(&mut c, &clock);
        clock.advance(WIN_DELAY_MS as u64);
        c.tick();
        let summary = c.last_summary().unwrap();

        assert!(c.apply_action(GameAction::ToggleStats));
        assert_eq!(c.overlay(), Overlay::Stats);
        assert!(c.apply_action(GameAction::ToggleStats));
        assert_eq!(c.overlay(), Overlay::WinSummary(summary));

        // Enter closes stats first, then plays again from the summary.
        c.apply_action(GameAction::ToggleStats);
        assert!(c.apply_action(GameAction::ClickCursor));
        assert_eq!(c.overlay(), Overlay::WinSummary(summary));
        assert_eq!(c.phase(), Phase::Won);
        assert!(c.apply_action(GameAction::ClickCursor));
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.overlay(), Overlay::None);
        assert_eq!(c.episode_id(), 1);
    }

    #[test]
    fn test_win_summary_waits_under_open_stats() {
        let (mut c, clock) = controller(Difficulty::Easy);
        win_easy(&mut c, &clock);
        c.apply_action(GameAction::ToggleStats);
        clock.advance(WIN_DELAY_MS as u64);
        c.tick();
        assert_eq!(c.overlay(), Overlay::Stats);

        assert!(c.apply_action(GameAction::DismissOverlay));
        assert!(matches!(c.overlay(), Overlay::WinSummary(_)));
        assert!(c.apply_action(GameAction::DismissOverlay));
        assert_eq!(c.overlay(), Overlay::None);
        assert_eq!(c.phase(), Phase::Won);
    }

    #[test]
    fn test_click_cursor_and_overlays() {
        let (mut c, _) = controller(Difficulty::Easy);
        assert!(c.apply_action(GameAction::ClickCursor));
        assert!(c.board().get(0).unwrap().flipped);

        assert!(c.apply_action(GameAction::ToggleStats));
        assert_eq!(c.overlay(), Overlay::Stats);
        // Clicking while the stats panel is up only closes it.
        assert!(c.apply_action(GameAction::ClickCursor));
        assert_eq!(c.overlay(), Overlay::None);
        assert!(!c.apply_action(GameAction::DismissOverlay));
    }

    #[test]
    fn test_toggle_dark_mode_persists() {
        let (mut c, _) = controller(Difficulty::Easy);
        c.apply_action(GameAction::ToggleDarkMode);
        assert!(c.dark_mode());
        assert!(c.persistence().load_dark_mode());
        assert!(c
            .take_events()
            .contains(&GameEvent::DarkModeChanged(true)));
    }

    #[test]
    fn test_persisted_state_is_loaded() {
        let store = MemoryStore::new()
            .with_entry("darkMode", "true")
            .with_entry("gameStats", r#"{"gamesPlayed":5,"gamesWon":4,"totalMoves":60}"#);
        let c = GameController::new(
            Difficulty::Easy,
            Theme::Animals,
            1,
            Persistence::new(store),
            ManualClock::new(0),
        )
        .unwrap();
        assert!(c.dark_mode());
        assert_eq!(c.stats().games_played, 5);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut c, _) = controller(Difficulty::Easy);
        let (a, b) = pairs(&c)[1];
        c.click_card(a);
        c.click_card(b);
        let snap = c.snapshot();
        assert_eq!(snap.cards.len(), 16);
        assert_eq!((snap.rows, snap.cols), (4, 4));
        assert!(snap.cards[a as usize].face_up);
        assert!(!snap.cards[a as usize].matched);
        assert_eq!(snap.moves, 1);
        assert!(snap.locked);
        assert!(!snap.playable());
        assert_eq!(snap.phase, Phase::Evaluating);
    }

    #[test]
    fn test_board_mut_allows_fixed_layouts() {
        let (mut c, clock) = controller(Difficulty::Easy);
        let cfg = Difficulty::Easy.config();
        let layout: Vec<u8> = (0..8u8).flat_map(|s| [s, s]).collect();
        *c.board_mut() = Board::from_symbols(cfg, &layout);

        c.click_card(0);
        assert_eq!(c.click_card(1), ClickOutcome::PairPending { matched: true });
        clock.advance(500);
        c.tick();
        assert_eq!(c.matched_pairs(), 1);
    }
}
