//! Input Module - crossterm event conversion
//!
//! Bridges crossterm's event system with [`KeyStroke`]. Used by the terminal
//! screen backend; the rest of the core only sees `KeyStroke`s.
//!
//! - `convert_key_event` - crossterm `KeyEvent` to `KeyStroke`
//! - `convert_event` - crossterm `Event` to [`InputEvent`]

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
};

use super::keyboard::{Key, KeyState, KeyStroke, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// What a backend can report.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event.
    Key(KeyStroke),
    /// Terminal resize (new columns, rows).
    Resize(u16, u16),
    /// Anything the core does not consume (mouse, focus, paste).
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyStroke.
///
/// Returns `None` for key codes without a logical counterpart (media keys,
/// lone modifiers, caps lock).
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyStroke> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    Some(KeyStroke {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    })
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.intersects(KeyModifiers::META | KeyModifiers::SUPER) {
        out |= Modifiers::META;
    }
    out
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => match convert_key_event(key) {
            Some(stroke) => InputEvent::Key(stroke),
            None => InputEvent::None,
        },
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_key_char() {
        let stroke = convert_key_event(key_event(KeyCode::Char('a'), KeyModifiers::empty()));
        let stroke = stroke.expect("char converts");
        assert_eq!(stroke.key, Key::Char('a'));
        assert_eq!(stroke.state, KeyState::Press);
        assert!(!stroke.is_ctrl_down());
    }

    #[test]
    fn test_convert_key_all_arrows() {
        let arrows = [
            (KeyCode::Up, Key::ArrowUp),
            (KeyCode::Down, Key::ArrowDown),
            (KeyCode::Left, Key::ArrowLeft),
            (KeyCode::Right, Key::ArrowRight),
        ];
        for (code, expected) in arrows {
            let stroke = convert_key_event(key_event(code, KeyModifiers::empty()));
            assert_eq!(stroke.map(|s| s.key), Some(expected));
        }
    }

    #[test]
    fn test_convert_modifiers() {
        let stroke = convert_key_event(key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ))
        .expect("char converts");
        assert!(stroke.is_ctrl_down());
        assert!(stroke.is_shift_down());
        assert!(!stroke.is_alt_down());
    }

    #[test]
    fn test_unmapped_code_is_dropped() {
        assert_eq!(
            convert_key_event(key_event(KeyCode::CapsLock, KeyModifiers::empty())),
            None
        );
        assert_eq!(
            convert_event(CrosstermEvent::Key(key_event(
                KeyCode::CapsLock,
                KeyModifiers::empty()
            ))),
            InputEvent::None
        );
    }

    #[test]
    fn test_convert_resize() {
        assert_eq!(
            convert_event(CrosstermEvent::Resize(80, 24)),
            InputEvent::Resize(80, 24)
        );
    }
}
