//! Key Translation
//!
//! Turns crossterm key events into the engine's [`Key`]s. Nothing here
//! decides what a key does; that depends on the controller's input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use trailview_core::Key;

/// Translate a terminal key event, or `None` for keys the browser ignores
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    // Only presses; release and repeat events are reported on some terminals
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Key::Interrupt),
            KeyCode::Char('u') => Some(Key::ClearLine),
            _ => None,
        };
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Key::Char('j'))
        );
        assert_eq!(
            translate_key(press(KeyCode::Down, KeyModifiers::NONE)),
            Some(Key::Down)
        );
        assert_eq!(
            translate_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Key::Esc)
        );
    }

    #[test]
    fn test_shifted_characters_pass_through() {
        assert_eq!(
            translate_key(press(KeyCode::Char('+'), KeyModifiers::SHIFT)),
            Some(Key::Char('+'))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Key::Char('G'))
        );
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(
            translate_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Interrupt)
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Key::ClearLine)
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_releases_and_unknown_keys_are_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(release), None);
        assert_eq!(
            translate_key(press(KeyCode::F(5), KeyModifiers::NONE)),
            None
        );
    }
}
