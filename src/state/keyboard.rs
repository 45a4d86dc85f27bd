//! Keyboard Module - Key strokes as the core sees them
//!
//! A key stroke is a logical key plus modifier flags. The core never looks at
//! escape sequences; backends (see [`super::input`]) decode those and hand
//! over `KeyStroke`s.
//!
//! # Example
//!
//! ```
//! use spark_gui::state::keyboard::{Key, KeyStroke, Modifiers};
//!
//! let tab = KeyStroke::new(Key::Tab);
//! let ctrl_c = KeyStroke::with_modifiers(Key::Char('c'), Modifiers::CTRL);
//! assert!(ctrl_c.is_ctrl_down());
//! assert!(!tab.is_ctrl_down());
//! ```

use std::fmt;

use super::focus::{FocusDirection, InputResult};

// =============================================================================
// TYPES
// =============================================================================

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    /// Shift+Tab as reported by most terminals.
    BackTab,
    Backspace,
    Delete,
    Insert,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// End of input; the backend will not produce more keys.
    Eof,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A single key stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub key: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyStroke {
    /// Create a simple key press
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Shorthand for a printable character press.
    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }

    pub fn is_ctrl_down(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    pub fn is_alt_down(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    pub fn is_shift_down(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

impl From<Key> for KeyStroke {
    fn from(key: Key) -> Self {
        KeyStroke::new(key)
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ctrl_down() {
            f.write_str("Ctrl+")?;
        }
        if self.is_alt_down() {
            f.write_str("Alt+")?;
        }
        if self.is_shift_down() {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

// =============================================================================
// DEFAULT NAVIGATION KEYS
// =============================================================================

/// Standard focus-navigation mapping for interactables.
///
/// - **Tab**: next interactable
/// - **Shift+Tab / BackTab**: previous interactable
/// - **Arrows**: move in that direction
///
/// Everything else is `Unhandled`. Widgets call this from their
/// `handle_input` for keys they do not use themselves.
pub fn default_focus_navigation(key: &KeyStroke) -> InputResult {
    if !key.is_press() {
        return InputResult::Unhandled;
    }
    match key.key {
        Key::Tab if key.is_shift_down() => InputResult::MoveFocus(FocusDirection::Previous),
        Key::Tab => InputResult::MoveFocus(FocusDirection::Next),
        Key::BackTab => InputResult::MoveFocus(FocusDirection::Previous),
        Key::ArrowLeft => InputResult::MoveFocus(FocusDirection::Left),
        Key::ArrowRight => InputResult::MoveFocus(FocusDirection::Right),
        Key::ArrowUp => InputResult::MoveFocus(FocusDirection::Up),
        Key::ArrowDown => InputResult::MoveFocus(FocusDirection::Down),
        _ => InputResult::Unhandled,
    }
}

// =============================================================================
// TESTS
// =============================================================================
