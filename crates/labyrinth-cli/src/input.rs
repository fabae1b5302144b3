//! Keyboard decoding and the input pump.

use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use labyrinth_core::input::Key;
use tracing::{debug, warn};

use crate::error::AppError;

/// Decodes a terminal event into a game key.
///
/// Only presses count; releases, repeats and non-key events yield `None`.
/// Ctrl+C maps to Escape since raw mode swallows the signal.
#[must_use]
pub fn decode(event: &Event) -> Option<Key> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(c) => Some(Key::Char(*c)),
        _ => None,
    }
}

/// Feeds decoded keys to the game thread until it finishes.
///
/// Polls at most one `tick` at a time so a finished game is noticed
/// promptly. Stops early if the receiver is gone.
///
/// # Errors
///
/// Returns `AppError::Terminal` if polling or reading the terminal fails.
pub fn pump<T>(sender: &Sender<Key>, tick: Duration, game: &JoinHandle<T>) -> Result<(), AppError> {
    while !game.is_finished() {
        if !event::poll(tick)? {
            continue;
        }
        let Some(key) = decode(&event::read()?) else {
            continue;
        };
        debug!(?key, "key pressed");
        if sender.send(key).is_err() {
            warn!("game thread stopped receiving input");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_and_control_keys() {
        assert_eq!(decode(&press(KeyCode::Up)), Some(Key::Up));
        assert_eq!(decode(&press(KeyCode::Left)), Some(Key::Left));
        assert_eq!(decode(&press(KeyCode::Tab)), Some(Key::Tab));
        assert_eq!(decode(&press(KeyCode::Esc)), Some(Key::Escape));
        assert_eq!(decode(&press(KeyCode::Enter)), Some(Key::Enter));
    }

    #[test]
    fn test_characters_pass_through() {
        assert_eq!(decode(&press(KeyCode::Char('3'))), Some(Key::Char('3')));
        assert_eq!(decode(&press(KeyCode::Char('w'))), Some(Key::Char('w')));
    }

    #[test]
    fn test_ctrl_c_is_escape() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(decode(&event), Some(Key::Escape));
    }

    #[test]
    fn test_release_and_other_events_are_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(decode(&release), None);
        assert_eq!(decode(&Event::Resize(80, 24)), None);
        assert_eq!(decode(&press(KeyCode::F(5))), None);
    }
}
