//! State Module - input and focus primitives shared by the tree and the pane.
//!
//! - **Keyboard** - key strokes, modifiers, default navigation keys
//! - **Input** - crossterm event conversion
//! - **Focus** - directions, input results, the interactable lookup map

pub mod focus;
pub mod input;
pub mod keyboard;

pub use focus::{FocusChangeDirection, FocusDirection, InputResult, InteractableLookupMap, LookupEntry};
pub use keyboard::{default_focus_navigation, Key, KeyState, KeyStroke, Modifiers};
