//! Key mapping from terminal events to game commands.

use crate::types::{NavCommand, SwitchPress};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Pixels the match card moves per arrow key press.
pub const NUDGE_PX: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Feed the switch-scanning interpreter.
    Switch(SwitchPress),
    /// Drag the match card by a pixel delta.
    Nudge { dx: f32, dy: f32 },
    /// Release the dragged card where it is.
    Drop,
    /// Tap a static card (zero-based).
    Tap(usize),
    Navigate(NavCommand),
    /// Lock key pressed or auto-repeated.
    LockHold,
    Quit,
}

/// Map keyboard input to a command.
///
/// With switches enabled, Space/Enter/`+`/F1/F3 belong to the scanner; Enter
/// no longer drops the dragged card.
pub fn handle_key_event(key: KeyEvent, switches_enabled: bool) -> Option<KeyCommand> {
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }

    if switches_enabled {
        let press = match key.code {
            KeyCode::Char(' ') => Some(SwitchPress::Space),
            KeyCode::Enter => Some(SwitchPress::Enter),
            KeyCode::Char('+') => Some(SwitchPress::Plus),
            KeyCode::F(1) => Some(SwitchPress::Switch1),
            KeyCode::F(3) => Some(SwitchPress::Switch3),
            KeyCode::F(2) => Some(SwitchPress::Generic),
            _ => None,
        };
        if let Some(press) = press {
            return Some(KeyCommand::Switch(press));
        }
    }

    match key.code {
        // Drag
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(KeyCommand::Nudge {
            dx: -NUDGE_PX,
            dy: 0.0,
        }),
        KeyCode::Right | KeyCode::Char('l') => Some(KeyCommand::Nudge { dx: NUDGE_PX, dy: 0.0 }),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(KeyCommand::Nudge {
            dx: 0.0,
            dy: -NUDGE_PX,
        }),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(KeyCommand::Nudge {
            dx: 0.0,
            dy: NUDGE_PX,
        }),
        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyCommand::Drop),

        // Tap
        KeyCode::Char(c @ '1'..='8') => Some(KeyCommand::Tap(c as usize - '1' as usize)),

        // Toolbar
        KeyCode::Home => Some(KeyCommand::Navigate(NavCommand::Start)),
        KeyCode::PageUp => Some(KeyCommand::Navigate(NavCommand::Previous)),
        KeyCode::PageDown => Some(KeyCommand::Navigate(NavCommand::Next)),
        KeyCode::End => Some(KeyCommand::Navigate(NavCommand::End)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyCommand::Navigate(NavCommand::Refresh)),
        KeyCode::Char('L') => Some(KeyCommand::LockHold),

        _ => None,
    }
}

/// Check if key asks to leave the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_drag_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Left), false),
            Some(KeyCommand::Nudge { dx: -NUDGE_PX, dy: 0.0 })
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), false),
            Some(KeyCommand::Nudge { dx: 0.0, dy: NUDGE_PX })
        );
        assert_eq!(handle_key_event(key(KeyCode::Enter), false), Some(KeyCommand::Drop));
    }

    #[test]
    fn test_switch_keys_only_when_enabled() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), true),
            Some(KeyCommand::Switch(SwitchPress::Space))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::F(3)), true),
            Some(KeyCommand::Switch(SwitchPress::Switch3))
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('+')), false), None);
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), false), Some(KeyCommand::Drop));
    }

    #[test]
    fn test_tap_and_toolbar_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('1')), false), Some(KeyCommand::Tap(0)));
        assert_eq!(handle_key_event(key(KeyCode::Char('8')), true), Some(KeyCommand::Tap(7)));
        assert_eq!(handle_key_event(key(KeyCode::Char('9')), false), None);
        assert_eq!(
            handle_key_event(key(KeyCode::End), false),
            Some(KeyCommand::Navigate(NavCommand::End))
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('L')), false), Some(KeyCommand::LockHold));
        assert_eq!(
            handle_key_event(key(KeyCode::Char('l')), false),
            Some(KeyCommand::Nudge { dx: NUDGE_PX, dy: 0.0 })
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(key(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(key(KeyCode::Char('x'))));
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), true), Some(KeyCommand::Quit));
    }
}
