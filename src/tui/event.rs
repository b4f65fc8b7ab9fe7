//! Event Handling
//!
//! Maps keyboard and timer events to application actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Quit the application (Ctrl+Q)
    Quit,
    /// Force quit without confirmation (Ctrl+C)
    ForceQuit,
    /// Enter: open selection, submit form, confirm dialog
    Submit,
    /// Toggle help overlay
    ToggleHelp,
    /// Escape - close overlay, go back
    Escape,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Move to next field (Tab)
    NextField,
    /// Move to previous field (Shift+Tab)
    PrevField,
    /// Backspace
    DeleteKey,
    /// Regular input character
    Input(KeyEvent),
    /// Timer tick
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = Self::map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }

    fn map_event(event: Event) -> Option<AppAction> {
        match event {
            Event::Key(key) => Self::map_key_event(key),
            _ => None,
        }
    }

    /// Map a key event to an app action
    pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
        // Ignore key release events on terminals that report them
        if key.kind == crossterm::event::KeyEventKind::Release {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),

            (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(AppAction::PrevField),

            (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
                KeyCode::Esc => Some(AppAction::Escape),
                KeyCode::Enter => Some(AppAction::Submit),
                KeyCode::F(1) => Some(AppAction::ToggleHelp),

                KeyCode::Up => Some(AppAction::MoveUp),
                KeyCode::Down => Some(AppAction::MoveDown),
                KeyCode::Left => Some(AppAction::MoveLeft),
                KeyCode::Right => Some(AppAction::MoveRight),

                KeyCode::Tab => Some(AppAction::NextField),
                KeyCode::BackTab => Some(AppAction::PrevField),
                KeyCode::Backspace => Some(AppAction::DeleteKey),

                // Letters are shortcuts or text depending on focus; the app decides
                _ => Some(AppAction::Input(key)),
            },

            _ => Some(AppAction::Input(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_shortcuts() {
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppAction::ForceQuit)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppAction::Submit)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Down, KeyModifiers::NONE)),
            Some(AppAction::MoveDown)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(AppAction::PrevField)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(AppAction::Escape)
        );
    }

    #[test]
    fn test_characters_pass_through() {
        let q = key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(EventHandler::map_key_event(q), Some(AppAction::Input(q)));

        let upper = key(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(EventHandler::map_key_event(upper), Some(AppAction::Input(upper)));
    }
}
