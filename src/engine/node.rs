//! Node - the per-component record stored in the arena.
//!
//! Every component has the same base fields (geometry, visibility, layout
//! data, invalid flag, parent). What it *is* lives in [`NodeKind`]; whether it
//! takes input lives in the optional [`InteractableState`].

use crate::layout::{LayoutData, LayoutManager};
use crate::types::{Position, Size};

use super::border::BorderRenderer;
use super::widget::{InputFilter, Widget};
use super::ComponentId;

// =============================================================================
// KIND
// =============================================================================

/// Tagged component variant.
pub enum NodeKind {
    /// No children.
    Leaf,
    /// Ordered children placed by a layout manager.
    Container(ContainerData),
    /// Exactly one (optional) wrapped child behind a border renderer.
    Border(BorderData),
}

impl NodeKind {
    /// Short name used in log output.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Leaf => "leaf",
            NodeKind::Container(_) => "container",
            NodeKind::Border(_) => "border",
        }
    }
}

pub struct ContainerData {
    pub(crate) children: Vec<ComponentId>,
    pub(crate) layout: Box<dyn LayoutManager>,
    /// Set on structural change; cleared by the next layout pass.
    pub(crate) changed: bool,
    /// Size used by the last layout pass.
    pub(crate) laid_out_at: Option<Size>,
}

pub struct BorderData {
    pub(crate) child: Option<ComponentId>,
    pub(crate) renderer: Box<dyn BorderRenderer>,
    pub(crate) title: String,
}

// =============================================================================
// INTERACTABLE CAPABILITY
// =============================================================================

/// Input capability attached to a component.
pub struct InteractableState {
    pub(crate) focusable: bool,
    pub(crate) enabled: bool,
    pub(crate) input_filter: Option<Box<dyn InputFilter>>,
}

impl Default for InteractableState {
    fn default() -> Self {
        Self {
            focusable: true,
            enabled: true,
            input_filter: None,
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

pub struct Node {
    pub(crate) parent: Option<ComponentId>,
    /// Relative to the parent's content origin.
    pub(crate) position: Position,
    pub(crate) size: Size,
    pub(crate) preferred_size_override: Option<Size>,
    pub(crate) visible: bool,
    pub(crate) layout_data: LayoutData,
    pub(crate) invalid: bool,
    pub(crate) kind: NodeKind,
    pub(crate) interactable: Option<InteractableState>,
    pub(crate) widget: Option<Box<dyn Widget>>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, widget: Option<Box<dyn Widget>>) -> Self {
        Self {
            parent: None,
            position: Position::ORIGIN,
            size: Size::ZERO,
            preferred_size_override: None,
            visible: true,
            layout_data: LayoutData::None,
            invalid: true,
            kind,
            interactable: None,
            widget,
        }
    }

    /// Child ids in order. Borders yield zero or one.
    pub(crate) fn children(&self) -> &[ComponentId] {
        match &self.kind {
            NodeKind::Leaf => &[],
            NodeKind::Container(data) => &data.children,
            NodeKind::Border(data) => data.child.as_slice(),
        }
    }

    /// Offset of the content area inside this component.
    pub(crate) fn content_offset(&self) -> Position {
        match &self.kind {
            NodeKind::Border(data) => data.renderer.wrapped_offset(),
            _ => Position::ORIGIN,
        }
    }

    /// Focusable and enabled, ignoring visibility.
    pub(crate) fn accepts_focus(&self) -> bool {
        self.interactable
            .as_ref()
            .is_some_and(|state| state.focusable && state.enabled)
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.interactable.as_ref().is_none_or(|state| state.enabled)
    }

    pub(crate) fn type_name(&self) -> &str {
        match (&self.widget, &self.kind) {
            (Some(widget), _) => widget.type_name(),
            (None, NodeKind::Border(_)) => "Border",
            (None, NodeKind::Container(_)) => "Panel",
            (None, NodeKind::Leaf) => "Component",
        }
    }
}
