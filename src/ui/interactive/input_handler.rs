//! Keyboard input: maps key presses to scoreboard actions and reads them off
//! the terminal on a blocking thread.

use crate::constants::polling;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleSport,
    Refresh,
    Quit,
    /// Terminal was resized.
    Redraw,
}

pub fn action_for_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Char(' ') | KeyCode::Tab => {
            Some(KeyAction::ToggleSport)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Refresh),
        _ => None,
    }
}

/// Polls terminal events until the receiving side goes away.
pub fn spawn_input_reader(actions: mpsc::UnboundedSender<KeyAction>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(polling::INPUT_POLL_MS);
        while !actions.is_closed() {
            let ready = match event::poll(poll_interval) {
                Ok(ready) => ready,
                Err(e) => {
                    warn!("Terminal event poll failed: {e}");
                    break;
                }
            };
            if !ready {
                continue;
            }
            let action = match event::read() {
                Ok(Event::Key(key)) => action_for_key(&key),
                Ok(Event::Resize(width, height)) => {
                    debug!("Terminal resized to {width}x{height}");
                    Some(KeyAction::Redraw)
                }
                Ok(_) => None,
                Err(e) => {
                    warn!("Failed to read terminal event: {e}");
                    break;
                }
            };
            if let Some(action) = action
                && actions.send(action).is_err()
            {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key(&press(KeyCode::Char('t'))), Some(KeyAction::ToggleSport));
        assert_eq!(action_for_key(&press(KeyCode::Char(' '))), Some(KeyAction::ToggleSport));
        assert_eq!(action_for_key(&press(KeyCode::Char('r'))), Some(KeyAction::Refresh));
        assert_eq!(action_for_key(&press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(action_for_key(&press(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(
            action_for_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(action_for_key(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for_key(&release), None);
    }
}
