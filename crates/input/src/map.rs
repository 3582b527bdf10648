//! Key mapping from terminal key codes to logical buttons.

use crate::types::LogicalButton;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a physical key to its logical button.
pub fn map_key(code: KeyCode) -> Option<LogicalButton> {
    match code {
        // Movement
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(LogicalButton::MoveUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(LogicalButton::MoveDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(LogicalButton::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(LogicalButton::MoveRight)
        }

        // Rotation
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(LogicalButton::RotateCw)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(LogicalButton::RotateCcw)
        }

        // Menu
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(LogicalButton::Start),
        KeyCode::Esc | KeyCode::Backspace => Some(LogicalButton::Back),

        // Shoulders
        KeyCode::PageUp => Some(LogicalButton::LeftShoulder),
        KeyCode::PageDown => Some(LogicalButton::RightShoulder),

        _ => None,
    }
}

/// Raw mode swallows SIGINT, so Ctrl+C has to be recognised by hand.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
