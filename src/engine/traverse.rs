//! Traverse - invalidation, lookup-map collection, input dispatch, drawing.

use crate::pane::InputDelivery;
use crate::renderer::TextGraphics;
use crate::state::focus::{InputResult, InteractableLookupMap};
use crate::state::keyboard::{default_focus_navigation, KeyStroke};
use crate::theme::Theme;
use crate::types::Position;

use super::node::NodeKind;
use super::registry::ComponentTree;
use super::widget::DrawContext;
use super::ComponentId;

impl ComponentTree {
    // =========================================================================
    // INVALIDATION
    // =========================================================================

    /// Mark `id` invalid and propagate upwards to the root.
    pub fn invalidate_component(&mut self, id: ComponentId) {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.nodes.get_mut(cur) else {
                return;
            };
            node.invalid = true;
            current = node.parent;
        }
    }

    /// Mark `id` and everything below it invalid.
    pub fn invalidate_subtree(&mut self, id: ComponentId) {
        for cur in self.descendants(id) {
            if let Some(node) = self.nodes.get_mut(cur) {
                node.invalid = true;
            }
        }
        // Ancestors must redraw too.
        self.invalidate_component(id);
    }

    pub fn is_invalid(&self, id: ComponentId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.invalid)
    }

    // =========================================================================
    // LOOKUP MAP
    // =========================================================================

    /// Record every visible, enabled, focusable interactable under `id` in
    /// pre-order.
    ///
    /// `origin` is the global position of `id`'s parent content origin.
    pub fn update_lookup_map(
        &self,
        id: ComponentId,
        origin: Position,
        map: &mut InteractableLookupMap,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let global = origin + node.position;
        if node.accepts_focus() {
            map.add(id, global, node.size);
        }
        let content = global + node.content_offset();
        for &child in node.children() {
            self.update_lookup_map(child, content, map);
        }
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Hand `key` to the interactable `id`: filter first, then its widget.
    ///
    /// A vetoing filter leaves the key unhandled so it keeps bubbling.
    pub fn dispatch_input(&mut self, id: ComponentId, key: &KeyStroke) -> InputResult {
        let Some(node) = self.nodes.get_mut(id) else {
            return InputResult::Unhandled;
        };
        let Some(state) = node.interactable.as_mut() else {
            return InputResult::Unhandled;
        };
        if !state.enabled {
            return InputResult::Unhandled;
        }
        if let Some(filter) = state.input_filter.as_mut() {
            if filter.on_input(id, key) == InputDelivery::Veto {
                return InputResult::Unhandled;
            }
        }
        match node.widget.as_mut() {
            Some(widget) => widget.handle_input(key),
            None => default_focus_navigation(key),
        }
    }

    /// Cursor location the widget of `id` asks for, in its own frame.
    pub fn cursor_location(&self, id: ComponentId) -> Option<Position> {
        self.nodes.get(id)?.widget.as_ref()?.cursor_location()
    }

    // =========================================================================
    // DRAW
    // =========================================================================

    /// Draw `id` and its subtree top-down into `graphics`, which must already
    /// cover `id`'s bounds. Every visited component becomes valid.
    pub fn draw(
        &mut self,
        id: ComponentId,
        graphics: &mut TextGraphics<'_>,
        theme: &Theme,
        focused: Option<ComponentId>,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.invalid = false;
        if !node.visible {
            return;
        }

        let definition = theme.definition(node.type_name());
        let ctx = DrawContext {
            id,
            size: node.size,
            focused: focused == Some(id),
            enabled: node.is_enabled(),
            definition,
        };
        if let Some(widget) = node.widget.as_mut() {
            widget.draw(graphics, &ctx);
        }
        if let NodeKind::Border(data) = &node.kind {
            data.renderer.draw(graphics, &data.title, definition);
        }

        let offset = node.content_offset();
        let children = node.children().to_vec();
        for child in children {
            let Some(child_node) = self.nodes.get(child) else {
                continue;
            };
            let mut sub = graphics.sub_graphics(offset + child_node.position, child_node.size);
            self.draw(child, &mut sub, theme, focused);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
