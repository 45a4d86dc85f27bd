//! Widget - the behavior plugged into a component.
//!
//! The core never decides what a component looks like or what it does with a
//! key. It asks the widget. Every method has a default so a widget only
//! implements what it needs.

use crate::pane::InputDelivery;
use crate::renderer::TextGraphics;
use crate::state::focus::{FocusChangeDirection, InputResult};
use crate::state::keyboard::{default_focus_navigation, KeyStroke};
use crate::theme::{ThemeDefinition, ThemeStyle};
use crate::types::{Position, Size};

use super::ComponentId;

// =============================================================================
// DRAW CONTEXT
// =============================================================================

/// What a widget knows about itself while drawing.
pub struct DrawContext<'a> {
    pub id: ComponentId,
    pub size: Size,
    /// This component holds the pane's focus.
    pub focused: bool,
    pub enabled: bool,
    /// Theme entry resolved for the widget's `type_name`.
    pub definition: &'a ThemeDefinition,
}

impl DrawContext<'_> {
    /// Style for the current state: insensitive when disabled, active when
    /// focused, normal otherwise.
    pub fn style(&self) -> &ThemeStyle {
        if !self.enabled {
            &self.definition.insensitive
        } else if self.focused {
            &self.definition.active
        } else {
            &self.definition.normal
        }
    }
}

// =============================================================================
// WIDGET
// =============================================================================

pub trait Widget: Send {
    /// Key used for theme lookup.
    fn type_name(&self) -> &str {
        "Component"
    }

    /// Natural size when nothing overrides it.
    fn preferred_size(&self) -> Size {
        Size::ZERO
    }

    /// Paint into `graphics`, which is already clipped and translated to the
    /// component's bounds.
    fn draw(&mut self, graphics: &mut TextGraphics<'_>, ctx: &DrawContext<'_>) {
        let _ = (graphics, ctx);
    }

    /// React to a key stroke while focused.
    fn handle_input(&mut self, key: &KeyStroke) -> InputResult {
        default_focus_navigation(key)
    }

    fn on_enter_focus(&mut self, direction: FocusChangeDirection, previous: Option<ComponentId>) {
        let _ = (direction, previous);
    }

    fn on_leave_focus(&mut self, direction: FocusChangeDirection, next: Option<ComponentId>) {
        let _ = (direction, next);
    }

    fn on_added(&mut self, parent: ComponentId) {
        let _ = parent;
    }

    fn on_removed(&mut self, parent: ComponentId) {
        let _ = parent;
    }

    /// Where the terminal cursor belongs while focused, relative to the
    /// component's top-left corner. `None` hides it.
    fn cursor_location(&self) -> Option<Position> {
        None
    }
}

// =============================================================================
// INPUT FILTER
// =============================================================================

/// Sees every key before an interactable does and may swallow it.
pub trait InputFilter: Send {
    fn on_input(&mut self, id: ComponentId, key: &KeyStroke) -> InputDelivery;
}

impl<F> InputFilter for F
where
    F: FnMut(ComponentId, &KeyStroke) -> InputDelivery + Send,
{
    fn on_input(&mut self, id: ComponentId, key: &KeyStroke) -> InputDelivery {
        self(id, key)
    }
}

/// A widget that draws nothing and only contributes a size.
///
/// Useful as a spacer and in tests.
#[derive(Debug, Clone, Default)]
pub struct EmptySpace {
    size: Size,
}

impl EmptySpace {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Widget for EmptySpace {
    fn type_name(&self) -> &str {
        "EmptySpace"
    }

    fn preferred_size(&self) -> Size {
        self.size
    }
}
