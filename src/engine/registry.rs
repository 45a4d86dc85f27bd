//! Component Registry - the component arena.
//!
//! Manages the lifecycle of components:
//! - Creation of leaves, containers, borders and interactables
//! - Attach/detach (`add_component`, `insert_component`, `remove_component`)
//! - Recursive destruction
//! - A revision counter bumped on every structural or geometric change, used
//!   by panes to rebuild their lookup maps lazily
//!
//! Geometry and traversal live in sibling modules as further `impl` blocks.

use slotmap::SlotMap;
use tracing::trace;

use crate::error::{GuiError, Result};
use crate::layout::{LayoutData, LayoutManager};
use crate::types::{Position, Size};

use super::border::BorderRenderer;
use super::node::{BorderData, ContainerData, InteractableState, Node, NodeKind};
use super::widget::{InputFilter, Widget};
use super::ComponentId;

// =============================================================================
// TREE
// =============================================================================

/// Arena holding every component of a pane.
pub struct ComponentTree {
    pub(crate) nodes: SlotMap<ComponentId, Node>,
    revision: u64,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            revision: 0,
        }
    }

    /// Number of live components, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bumped on every change that can move, hide or (un)focus something.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn exists(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub(crate) fn node(&self, id: ComponentId) -> Result<&Node> {
        self.nodes.get(id).ok_or(GuiError::ComponentNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(GuiError::ComponentNotFound(id))
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    /// Create a leaf driven by `widget`.
    pub fn create_component(&mut self, widget: impl Widget + 'static) -> ComponentId {
        self.insert_node(Node::new(NodeKind::Leaf, Some(Box::new(widget))))
    }

    /// Create a focusable, enabled leaf driven by `widget`.
    pub fn create_interactable(&mut self, widget: impl Widget + 'static) -> ComponentId {
        let mut node = Node::new(NodeKind::Leaf, Some(Box::new(widget)));
        node.interactable = Some(InteractableState::default());
        self.insert_node(node)
    }

    /// Create an empty container placed by `layout`.
    pub fn create_container(&mut self, layout: impl LayoutManager + 'static) -> ComponentId {
        let data = ContainerData {
            children: Vec::new(),
            layout: Box::new(layout),
            changed: true,
            laid_out_at: None,
        };
        self.insert_node(Node::new(NodeKind::Container(data), None))
    }

    /// Create an empty border painted by `renderer`.
    pub fn create_border(&mut self, renderer: impl BorderRenderer + 'static) -> ComponentId {
        let data = BorderData {
            child: None,
            renderer: Box::new(renderer),
            title: String::new(),
        };
        self.insert_node(Node::new(NodeKind::Border(data), None))
    }

    fn insert_node(&mut self, node: Node) -> ComponentId {
        let kind = node.kind.label();
        let id = self.nodes.insert(node);
        trace!(?id, kind, "component created");
        id
    }

    /// Replace the widget of any component (containers and borders draw it
    /// underneath their children).
    pub fn set_widget(&mut self, id: ComponentId, widget: impl Widget + 'static) -> Result<()> {
        self.node_mut(id)?.widget = Some(Box::new(widget));
        self.invalidate_component(id);
        Ok(())
    }

    pub fn widget(&self, id: ComponentId) -> Option<&dyn Widget> {
        self.nodes.get(id)?.widget.as_deref()
    }

    pub fn widget_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id)?.widget.as_deref_mut()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(id)?.parent
    }

    /// Ordered children. Borders report their wrapped child; leaves nothing.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        match self.nodes.get(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    pub fn child_count(&self, id: ComponentId) -> usize {
        self.children(id).len()
    }

    /// True if `child` is a direct child of `container`.
    pub fn contains_component(&self, container: ComponentId, child: ComponentId) -> bool {
        self.parent(child) == Some(container) && self.children(container).contains(&child)
    }

    pub fn is_container(&self, id: ComponentId) -> bool {
        matches!(self.nodes.get(id).map(|n| &n.kind), Some(NodeKind::Container(_)))
    }

    pub fn is_border(&self, id: ComponentId) -> bool {
        matches!(self.nodes.get(id).map(|n| &n.kind), Some(NodeKind::Border(_)))
    }

    /// True if `ancestor` is `id` or lies on its parent chain.
    pub fn is_attached_to(&self, id: ComponentId, ancestor: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.parent(cur);
        }
        false
    }

    /// Topmost ancestor of `id` (itself if detached).
    pub fn root_of(&self, id: ComponentId) -> ComponentId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// `id` and everything below it, pre-order.
    pub fn descendants(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children().iter().rev().copied());
        }
        out
    }

    // =========================================================================
    // INTERACTABLE STATE
    // =========================================================================

    pub fn is_interactable(&self, id: ComponentId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.interactable.is_some())
    }

    /// Give an existing component the interactable capability.
    pub fn make_interactable(&mut self, id: ComponentId) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.interactable.is_none() {
            node.interactable = Some(InteractableState::default());
            self.touch();
        }
        Ok(())
    }

    /// Focusable, enabled, and visible along the whole parent chain.
    pub fn is_focusable(&self, id: ComponentId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.accepts_focus() && self.is_visible_in_tree(id)
    }

    pub fn is_enabled(&self, id: ComponentId) -> bool {
        self.nodes.get(id).is_some_and(Node::is_enabled)
    }

    pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> Result<()> {
        self.update_interactable(id, |state| &mut state.enabled, enabled)
    }

    pub fn set_focusable(&mut self, id: ComponentId, focusable: bool) -> Result<()> {
        self.update_interactable(id, |state| &mut state.focusable, focusable)
    }

    fn update_interactable(
        &mut self,
        id: ComponentId,
        field: impl FnOnce(&mut InteractableState) -> &mut bool,
        value: bool,
    ) -> Result<()> {
        let state = self
            .node_mut(id)?
            .interactable
            .as_mut()
            .ok_or(GuiError::NotFocusable(id))?;
        let slot = field(state);
        if *slot != value {
            *slot = value;
            self.touch();
            self.invalidate_component(id);
        }
        Ok(())
    }

    /// Install (or clear) the filter consulted before the widget sees a key.
    pub fn set_input_filter(
        &mut self,
        id: ComponentId,
        filter: Option<Box<dyn InputFilter>>,
    ) -> Result<()> {
        let state = self
            .node_mut(id)?
            .interactable
            .as_mut()
            .ok_or(GuiError::NotFocusable(id))?;
        state.input_filter = filter;
        Ok(())
    }

    // =========================================================================
    // ATTACH / DETACH
    // =========================================================================

    /// Append `child` to `container`, detaching it from any previous parent.
    ///
    /// On a border this replaces the wrapped component.
    pub fn add_component(&mut self, container: ComponentId, child: ComponentId) -> Result<()> {
        let index = self.child_count(container);
        self.insert_component(container, index, child)
    }

    /// Insert `child` at `index` (clamped) in `container`'s child list.
    pub fn insert_component(
        &mut self,
        container: ComponentId,
        index: usize,
        child: ComponentId,
    ) -> Result<()> {
        self.node(child)?;
        match &self.node(container)?.kind {
            NodeKind::Leaf => return Err(GuiError::NotAContainer(container)),
            NodeKind::Border(_) => return self.set_component(container, Some(child)),
            NodeKind::Container(_) => {}
        }
        if self.is_attached_to(container, child) {
            return Err(GuiError::CyclicHierarchy(child));
        }

        self.detach(child);

        if let Some(NodeKind::Container(data)) = self.nodes.get_mut(container).map(|n| &mut n.kind) {
            let index = index.min(data.children.len());
            data.children.insert(index, child);
            data.changed = true;
        }
        self.attach(container, child);
        Ok(())
    }

    /// Detach `child` from `container`. Returns whether it was a child.
    pub fn remove_component(&mut self, container: ComponentId, child: ComponentId) -> Result<bool> {
        self.node(container)?;
        if !self.contains_component(container, child) {
            return Ok(false);
        }
        self.detach(child);
        Ok(true)
    }

    /// Set (or clear) the component wrapped by `border`.
    ///
    /// The child is placed at the content origin and sized to the border's
    /// wrapped size straight away.
    pub fn set_component(&mut self, border: ComponentId, child: Option<ComponentId>) -> Result<()> {
        let previous = match &self.node(border)?.kind {
            NodeKind::Border(data) => data.child,
            _ => return Err(GuiError::NotAContainer(border)),
        };
        if previous == child {
            return Ok(());
        }
        if let Some(child) = child {
            self.node(child)?;
            if self.is_attached_to(border, child) {
                return Err(GuiError::CyclicHierarchy(child));
            }
        }

        if let Some(previous) = previous {
            self.detach(previous);
        }
        let Some(child) = child else {
            self.invalidate_component(border);
            return Ok(());
        };

        self.detach(child);
        if let Some(NodeKind::Border(data)) = self.nodes.get_mut(border).map(|n| &mut n.kind) {
            data.child = Some(child);
        }
        self.attach(border, child);
        self.sync_border_child(border);
        Ok(())
    }

    /// The component wrapped by `border`.
    pub fn border_component(&self, border: ComponentId) -> Option<ComponentId> {
        match &self.nodes.get(border)?.kind {
            NodeKind::Border(data) => data.child,
            _ => None,
        }
    }

    pub fn set_border_title(&mut self, border: ComponentId, title: impl Into<String>) -> Result<()> {
        match &mut self.node_mut(border)?.kind {
            NodeKind::Border(data) => data.title = title.into(),
            _ => return Err(GuiError::NotAContainer(border)),
        }
        self.invalidate_component(border);
        Ok(())
    }

    fn attach(&mut self, parent: ComponentId, child: ComponentId) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
            if let Some(widget) = node.widget.as_mut() {
                widget.on_added(parent);
            }
        }
        self.touch();
        self.invalidate_component(parent);
        self.invalidate_subtree(child);
        trace!(?parent, ?child, "component attached");
    }

    /// Unlink `child` from its parent, if any.
    fn detach(&mut self, child: ComponentId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            match &mut node.kind {
                NodeKind::Container(data) => {
                    data.children.retain(|c| *c != child);
                    data.changed = true;
                }
                NodeKind::Border(data) => {
                    if data.child == Some(child) {
                        data.child = None;
                    }
                }
                NodeKind::Leaf => {}
            }
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
            if let Some(widget) = node.widget.as_mut() {
                widget.on_removed(parent);
            }
        }
        self.touch();
        self.invalidate_component(parent);
        trace!(?parent, ?child, "component detached");
    }

    /// Detach `id` and free it together with its whole subtree.
    pub fn destroy_component(&mut self, id: ComponentId) -> Result<()> {
        self.node(id)?;
        self.detach(id);
        for doomed in self.descendants(id) {
            self.nodes.remove(doomed);
        }
        self.touch();
        trace!(?id, "component destroyed");
        Ok(())
    }

    // =========================================================================
    // LAYOUT SETTINGS
    // =========================================================================

    pub fn layout_data(&self, id: ComponentId) -> LayoutData {
        let Some(node) = self.nodes.get(id) else {
            return LayoutData::None;
        };
        // Borders carry their wrapped component's layout data.
        match &node.kind {
            NodeKind::Border(BorderData { child: Some(child), .. }) => self.layout_data(*child),
            _ => node.layout_data,
        }
    }

    pub fn set_layout_data(&mut self, id: ComponentId, data: LayoutData) -> Result<()> {
        let target = match &self.node(id)?.kind {
            NodeKind::Border(BorderData { child: Some(child), .. }) => *child,
            _ => id,
        };
        self.node_mut(target)?.layout_data = data;
        // The border itself stores it too so it survives a child swap.
        self.node_mut(id)?.layout_data = data;
        self.mark_parent_changed(id);
        Ok(())
    }

    pub fn set_layout_manager(
        &mut self,
        container: ComponentId,
        layout: impl LayoutManager + 'static,
    ) -> Result<()> {
        match &mut self.node_mut(container)?.kind {
            NodeKind::Container(data) => {
                data.layout = Box::new(layout);
                data.changed = true;
            }
            _ => return Err(GuiError::NotAContainer(container)),
        }
        self.touch();
        self.invalidate_component(container);
        Ok(())
    }

    pub fn is_visible(&self, id: ComponentId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    /// Visible itself and along the whole parent chain.
    pub fn is_visible_in_tree(&self, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.nodes.get(cur) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn set_visible(&mut self, id: ComponentId, visible: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.visible != visible {
            node.visible = visible;
            self.touch();
            self.mark_parent_changed(id);
            self.invalidate_component(id);
        }
        Ok(())
    }

    /// Set or clear the preferred-size override.
    pub fn set_preferred_size(&mut self, id: ComponentId, size: Option<Size>) -> Result<()> {
        self.node_mut(id)?.preferred_size_override = size;
        self.mark_parent_changed(id);
        Ok(())
    }

    /// Flag `id`'s parent container for a re-flow.
    pub(crate) fn mark_parent_changed(&mut self, id: ComponentId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(NodeKind::Container(data)) = self.nodes.get_mut(parent).map(|n| &mut n.kind) {
            data.changed = true;
        }
        self.invalidate_component(parent);
    }

    pub fn position(&self, id: ComponentId) -> Position {
        self.nodes.get(id).map_or(Position::ORIGIN, |n| n.position)
    }

    pub fn size(&self, id: ComponentId) -> Size {
        self.nodes.get(id).map_or(Size::ZERO, |n| n.size)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EmptySpace;
    use crate::layout::LinearLayout;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Widget for Recorder {
        fn on_added(&mut self, _parent: ComponentId) {
            self.log.lock().unwrap().push("added".into());
        }

        fn on_removed(&mut self, _parent: ComponentId) {
            self.log.lock().unwrap().push("removed".into());
        }
    }

    fn leaf(tree: &mut ComponentTree) -> ComponentId {
        tree.create_component(EmptySpace::new(Size::new(1, 1)))
    }

    #[test]
    fn test_add_then_remove_restores_children() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let a = leaf(&mut tree);
        let b = leaf(&mut tree);
        tree.add_component(root, a).unwrap();
        let before: Vec<_> = tree.children(root).to_vec();

        tree.add_component(root, b).unwrap();
        assert_eq!(tree.child_count(root), 2);
        assert!(tree.remove_component(root, b).unwrap());

        assert_eq!(tree.children(root), before.as_slice());
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    fn test_remove_absent_returns_false() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let a = leaf(&mut tree);
        assert!(!tree.remove_component(root, a).unwrap());
    }

    #[test]
    fn test_add_reparents() {
        let mut tree = ComponentTree::new();
        let first = tree.create_container(LinearLayout::vertical());
        let second = tree.create_container(LinearLayout::vertical());
        let a = leaf(&mut tree);
        tree.add_component(first, a).unwrap();
        tree.add_component(second, a).unwrap();
        assert_eq!(tree.child_count(first), 0);
        assert_eq!(tree.parent(a), Some(second));
        assert!(tree.contains_component(second, a));
    }

    #[test]
    fn test_callbacks_fire() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let c = tree.create_component(Recorder { log: log.clone() });
        tree.add_component(root, c).unwrap();
        tree.remove_component(root, c).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["added", "removed"]);
    }

    #[test]
    fn test_insert_order() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let a = leaf(&mut tree);
        let b = leaf(&mut tree);
        let c = leaf(&mut tree);
        tree.add_component(root, a).unwrap();
        tree.add_component(root, c).unwrap();
        tree.insert_component(root, 1, b).unwrap();
        assert_eq!(tree.children(root), &[a, b, c]);
    }

    #[test]
    fn test_leaf_is_not_a_container() {
        let mut tree = ComponentTree::new();
        let a = leaf(&mut tree);
        let b = leaf(&mut tree);
        assert!(matches!(tree.add_component(a, b), Err(GuiError::NotAContainer(_))));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = ComponentTree::new();
        let outer = tree.create_container(LinearLayout::vertical());
        let inner = tree.create_container(LinearLayout::vertical());
        tree.add_component(outer, inner).unwrap();
        assert!(matches!(
            tree.add_component(inner, outer),
            Err(GuiError::CyclicHierarchy(_))
        ));
        assert!(tree.add_component(outer, outer).is_err());
        assert_eq!(tree.parent(outer), None);
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let inner = tree.create_container(LinearLayout::vertical());
        let a = leaf(&mut tree);
        tree.add_component(root, inner).unwrap();
        tree.add_component(inner, a).unwrap();

        tree.destroy_component(inner).unwrap();
        assert!(!tree.exists(inner));
        assert!(!tree.exists(a));
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_border_holds_one_child() {
        let mut tree = ComponentTree::new();
        let border = tree.create_border(crate::engine::LineBorder::default());
        let a = leaf(&mut tree);
        let b = leaf(&mut tree);
        tree.add_component(border, a).unwrap();
        tree.add_component(border, b).unwrap();
        assert_eq!(tree.children(border), &[b]);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.border_component(border), Some(b));
    }

    #[test]
    fn test_revision_moves_on_change() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let a = leaf(&mut tree);
        let r0 = tree.revision();
        tree.add_component(root, a).unwrap();
        let r1 = tree.revision();
        assert_ne!(r0, r1);
        tree.set_visible(a, false).unwrap();
        assert_ne!(tree.revision(), r1);
    }

    #[test]
    fn test_focusable_requires_visible_chain() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let button = tree.create_interactable(EmptySpace::default());
        tree.add_component(root, button).unwrap();
        assert!(tree.is_focusable(button));
        tree.set_visible(root, false).unwrap();
        assert!(!tree.is_focusable(button));
        tree.set_visible(root, true).unwrap();
        tree.set_enabled(button, false).unwrap();
        assert!(!tree.is_focusable(button));
    }
}
