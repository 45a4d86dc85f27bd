//! Geometry - preferred sizes, layout passes and coordinate translation.

use tracing::trace;

use crate::error::{GuiError, Result};
use crate::layout::LayoutChild;
use crate::types::{Position, Size};

use super::node::NodeKind;
use super::registry::ComponentTree;
use super::ComponentId;

impl ComponentTree {
    // =========================================================================
    // PREFERRED SIZE
    // =========================================================================

    /// Override if set, else what the layout, border or widget asks for.
    pub fn preferred_size(&self, id: ComponentId) -> Size {
        let Some(node) = self.nodes.get(id) else {
            return Size::ZERO;
        };
        if let Some(size) = node.preferred_size_override {
            return size;
        }
        match &node.kind {
            NodeKind::Leaf => node
                .widget
                .as_ref()
                .map_or(Size::ZERO, |widget| widget.preferred_size()),
            NodeKind::Container(data) => {
                let children = self.layout_children(&data.children);
                data.layout.preferred_size(&children)
            }
            NodeKind::Border(data) => {
                let wrapped = data.child.map_or(Size::ZERO, |child| self.preferred_size(child));
                data.renderer.border_size(wrapped)
            }
        }
    }

    pub fn preferred_size_override(&self, id: ComponentId) -> Option<Size> {
        self.nodes.get(id)?.preferred_size_override
    }

    /// Layout input for the visible entries of `ids`.
    fn layout_children(&self, ids: &[ComponentId]) -> Vec<LayoutChild> {
        ids.iter()
            .filter_map(|&id| {
                let node = self.nodes.get(id)?;
                node.visible.then(|| LayoutChild {
                    id,
                    preferred_size: self.preferred_size(id),
                    has_override: node.preferred_size_override.is_some(),
                    layout_data: self.layout_data(id),
                    position: node.position,
                    size: node.size,
                })
            })
            .collect()
    }

    // =========================================================================
    // POSITION / SIZE
    // =========================================================================

    /// Move `id` within its parent's content area.
    pub fn set_position(&mut self, id: ComponentId, position: Position) -> Result<()> {
        self.node(id)?;
        self.apply_position(id, position);
        Ok(())
    }

    /// Resize `id`. Borders resize their wrapped component to match.
    pub fn set_size(&mut self, id: ComponentId, size: Size) -> Result<()> {
        self.node(id)?;
        self.apply_size(id, size);
        Ok(())
    }

    pub(crate) fn apply_position(&mut self, id: ComponentId, position: Position) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.position == position {
            return;
        }
        node.position = position;
        self.touch();
        self.invalidate_component(id);
    }

    pub(crate) fn apply_size(&mut self, id: ComponentId, size: Size) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.size == size {
            return;
        }
        node.size = size;
        self.touch();
        self.invalidate_component(id);
        if matches!(self.nodes.get(id).map(|n| &n.kind), Some(NodeKind::Border(_))) {
            self.sync_border_child(id);
        }
    }

    /// Pin the wrapped component to the content origin and the wrapped size.
    pub(crate) fn sync_border_child(&mut self, border: ComponentId) {
        let Some(node) = self.nodes.get(border) else {
            return;
        };
        let NodeKind::Border(data) = &node.kind else {
            return;
        };
        let Some(child) = data.child else {
            return;
        };
        let wrapped = data.renderer.wrapped_size(node.size);
        self.apply_position(child, Position::ORIGIN);
        self.apply_size(child, wrapped);
    }

    // =========================================================================
    // LAYOUT
    // =========================================================================

    /// Re-flow every container under `id` whose layout is stale.
    ///
    /// A container is stale when it was marked changed, its layout manager
    /// reports a change, or it was resized since its last pass.
    pub fn layout(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let stale = match &node.kind {
            NodeKind::Container(data) => {
                data.changed || data.layout.has_changed() || data.laid_out_at != Some(node.size)
            }
            _ => false,
        };
        if stale {
            self.layout_container(id);
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.layout(child);
        }
    }

    fn layout_container(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let NodeKind::Container(data) = &node.kind else {
            return;
        };
        let area = node.size;
        let mut children = self.layout_children(&data.children);

        if let Some(NodeKind::Container(data)) = self.nodes.get_mut(id).map(|n| &mut n.kind) {
            data.layout.do_layout(area, &mut children);
            data.changed = false;
            data.laid_out_at = Some(area);
        }
        trace!(?id, %area, children = children.len(), "layout pass");

        for child in &children {
            self.apply_position(child.id, child.position);
            self.apply_size(child.id, child.size);
        }
        self.invalidate_component(id);
    }

    /// True if `id` is a container waiting for a layout pass.
    pub fn needs_layout(&self, id: ComponentId) -> bool {
        self.descendants(id).into_iter().any(|cur| {
            let Some(node) = self.nodes.get(cur) else {
                return false;
            };
            match &node.kind {
                NodeKind::Container(data) => {
                    data.changed
                        || data.layout.has_changed()
                        || data.laid_out_at != Some(node.size)
                }
                _ => false,
            }
        })
    }

    // =========================================================================
    // COORDINATES
    // =========================================================================

    /// Translate `local` (relative to `id`'s top-left corner) into the frame
    /// of `ancestor`'s top-left corner.
    ///
    /// Each hop adds the component's own position plus its parent's content
    /// offset. `None` if `ancestor` is not on the parent chain.
    pub fn to_ancestor(
        &self,
        id: ComponentId,
        ancestor: ComponentId,
        local: Position,
    ) -> Option<Position> {
        let mut position = local;
        let mut current = id;
        loop {
            if current == ancestor {
                return Some(position);
            }
            let node = self.nodes.get(current)?;
            let parent = node.parent?;
            let offset = self.nodes.get(parent)?.content_offset();
            position = position + node.position + offset;
            current = parent;
        }
    }

    /// Position of `local` in the frame the topmost ancestor is placed in.
    pub fn absolute_position(&self, id: ComponentId, local: Position) -> Result<Position> {
        self.node(id)?;
        let root = self.root_of(id);
        let relative = self
            .to_ancestor(id, root, local)
            .ok_or(GuiError::DetachedComponentOperation(id))?;
        Ok(relative + self.position(root))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::engine::{ComponentTree, EmptySpace, LineBorder, SpacerBorder};
    use crate::layout::{AbsoluteLayout, LinearLayout};
    use crate::types::{Position, Size};

    #[test]
    fn test_border_places_child_at_content_origin() {
        let mut tree = ComponentTree::new();
        let border = tree.create_border(LineBorder::default());
        let child = tree.create_component(EmptySpace::default());
        tree.set_size(border, Size::new(10, 5)).unwrap();
        tree.set_position(child, Position::new(3, 3)).unwrap();
        tree.set_component(border, Some(child)).unwrap();

        assert_eq!(tree.position(child), Position::ORIGIN);
        assert_eq!(tree.size(child), Size::new(8, 3));

        tree.set_size(border, Size::new(1, 1)).unwrap();
        assert_eq!(tree.size(child), Size::ZERO);
    }

    #[test]
    fn test_global_position_adds_border_offset() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(AbsoluteLayout::new());
        let border = tree.create_border(SpacerBorder::new(1, 2, 0, 0));
        let child = tree.create_component(EmptySpace::new(Size::new(2, 1)));
        tree.set_position(root, Position::new(5, 5)).unwrap();
        tree.add_component(root, border).unwrap();
        tree.set_position(border, Position::new(10, 3)).unwrap();
        tree.set_size(border, Size::new(6, 4)).unwrap();
        tree.set_component(border, Some(child)).unwrap();

        // root(5,5) + border(10,3) + offset(2,1) + child(0,0)
        assert_eq!(
            tree.absolute_position(child, Position::ORIGIN).unwrap(),
            Position::new(17, 9)
        );
        assert_eq!(
            tree.to_ancestor(child, root, Position::new(1, 0)),
            Some(Position::new(13, 4))
        );
    }

    #[test]
    fn test_to_ancestor_detached() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(AbsoluteLayout::new());
        let other = tree.create_component(EmptySpace::default());
        assert_eq!(tree.to_ancestor(other, root, Position::ORIGIN), None);
    }

    #[test]
    fn test_preferred_size_sources() {
        let mut tree = ComponentTree::new();
        let leaf = tree.create_component(EmptySpace::new(Size::new(4, 2)));
        assert_eq!(tree.preferred_size(leaf), Size::new(4, 2));

        let border = tree.create_border(LineBorder::default());
        tree.set_component(border, Some(leaf)).unwrap();
        assert_eq!(tree.preferred_size(border), Size::new(6, 4));

        tree.set_preferred_size(leaf, Some(Size::new(1, 1))).unwrap();
        assert_eq!(tree.preferred_size(border), Size::new(3, 3));
    }

    #[test]
    fn test_layout_assigns_child_bounds() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::vertical());
        let a = tree.create_component(EmptySpace::new(Size::new(5, 1)));
        let b = tree.create_component(EmptySpace::new(Size::new(3, 2)));
        tree.add_component(root, a).unwrap();
        tree.add_component(root, b).unwrap();
        tree.set_size(root, Size::new(20, 10)).unwrap();

        assert!(tree.needs_layout(root));
        tree.layout(root);
        assert!(!tree.needs_layout(root));

        assert_eq!(tree.position(a), Position::new(0, 0));
        assert_eq!(tree.position(b), Position::new(0, 1));
        assert_eq!(tree.size(b), Size::new(3, 2));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut tree = ComponentTree::new();
        let root = tree.create_container(LinearLayout::horizontal());
        let a = tree.create_component(EmptySpace::new(Size::new(5, 1)));
        tree.add_component(root, a).unwrap();
        tree.set_size(root, Size::new(20, 1)).unwrap();
        tree.layout(root);
        let revision = tree.revision();
        tree.layout(root);
        assert_eq!(tree.revision(), revision);
    }
}
