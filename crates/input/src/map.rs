//! Key and mouse mapping from terminal events to game actions.

use crate::types::{Difficulty, Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::MoveCursor(Direction::Down))
        }

        // Flip
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::ClickCursor),

        // Settings (each starts a new game)
        KeyCode::Char('1') => Some(GameAction::SetDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(GameAction::SetDifficulty(Difficulty::Medium)),
        KeyCode::Char('3') => Some(GameAction::SetDifficulty(Difficulty::Hard)),
        KeyCode::Tab => Some(GameAction::CycleDifficulty),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(GameAction::CycleTheme),

        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(GameAction::NewGame)
        }

        // Presentation
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleDarkMode),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::ToggleStats),
        KeyCode::Esc => Some(GameAction::DismissOverlay),

        _ => None,
    }
}

/// What sits under a clicked terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTarget {
    Card(u8),
    /// Inside the open modal.
    Modal,
    /// Outside the open modal.
    Backdrop,
    Nothing,
}

/// Map a mouse event to a game action.
///
/// `hit_test` resolves terminal coordinates against the current layout.
/// Clicking the modal acts like Enter; clicking beside it closes it.
pub fn handle_mouse_event(
    mouse: MouseEvent,
    hit_test: impl Fn(u16, u16) -> MouseTarget,
) -> Option<GameAction> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    match hit_test(mouse.column, mouse.row) {
        MouseTarget::Card(position) => Some(GameAction::ClickCard(position)),
        MouseTarget::Modal => Some(GameAction::ClickCursor),
        MouseTarget::Backdrop => Some(GameAction::DismissOverlay),
        MouseTarget::Nothing => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
