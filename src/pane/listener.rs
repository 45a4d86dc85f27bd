//! Pane listeners and the explicit veto / propagation results they return.

use crate::state::keyboard::KeyStroke;

use super::BasePane;

/// Whether a key stroke may continue to the focused interactable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputDelivery {
    #[default]
    Allow,
    /// Swallow the key; nothing further sees it.
    Veto,
}

/// Whether an unhandled key stroke should keep escalating to the GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    Handled,
    #[default]
    Unhandled,
}

/// Observes key strokes arriving at a pane.
pub trait BasePaneListener: Send {
    /// Called before the focused interactable sees `key`.
    fn on_input(&mut self, pane: &BasePane, key: &KeyStroke) -> InputDelivery {
        let _ = (pane, key);
        InputDelivery::Allow
    }

    /// Called when nothing in the pane consumed `key`.
    fn on_unhandled_input(&mut self, pane: &BasePane, key: &KeyStroke) -> Propagation {
        let _ = (pane, key);
        Propagation::Unhandled
    }
}

/// Identifies a registered listener for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) usize);
