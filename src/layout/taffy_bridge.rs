//! Taffy Bridge - flexbox layout policy
//!
//! Converts a container's children into a throwaway Taffy tree, runs the
//! flexbox computation for the container's area, and copies the rounded
//! results back into the [`LayoutChild`] slots.
//!
//! Each child becomes a leaf whose flex basis is its preferred length along
//! the main axis (or the explicit basis in its [`FlexItem`]). A child with a
//! preferred-size override gets that length as its minimum, so it only
//! shrinks when the container is smaller than the override.

use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, JustifyContent as TaffyJustifyContent, LengthPercentage,
    NodeId, Size as TaffySize, Style, TaffyTree,
};
use tracing::warn;

use crate::types::{Position, Size};

use super::{LayoutChild, LayoutData, LayoutManager};

// =============================================================================
// SETTINGS
// =============================================================================

/// Main axis of a [`FlexLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

/// Main-axis distribution of free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

/// Per-child flex factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexItem {
    pub grow: f32,
    pub shrink: f32,
    /// Main-axis basis in cells; `None` uses the preferred length.
    pub basis: Option<u16>,
}

impl Default for FlexItem {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: None,
        }
    }
}

impl FlexItem {
    pub fn grow(grow: f32) -> Self {
        Self {
            grow,
            ..Self::default()
        }
    }
}

impl From<FlexItem> for LayoutData {
    fn from(item: FlexItem) -> Self {
        LayoutData::Flex(item)
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(direction: FlexDirection) -> TaffyFlexDirection {
    match direction {
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::Column => TaffyFlexDirection::Column,
    }
}

fn to_taffy_justify(justify: Justify) -> TaffyJustifyContent {
    match justify {
        Justify::Start => TaffyJustifyContent::FlexStart,
        Justify::Center => TaffyJustifyContent::Center,
        Justify::End => TaffyJustifyContent::FlexEnd,
        Justify::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        Justify::SpaceAround => TaffyJustifyContent::SpaceAround,
    }
}

fn cells(length: u16) -> TaffyDimension {
    TaffyDimension::Length(length as f32)
}

fn to_cells(value: f32) -> u16 {
    value.round().clamp(0.0, u16::MAX as f32) as u16
}

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Clone)]
pub struct FlexLayout {
    direction: FlexDirection,
    justify: Justify,
    gap: u16,
    changed: bool,
}

impl FlexLayout {
    pub fn new(direction: FlexDirection) -> Self {
        Self {
            direction,
            justify: Justify::Start,
            gap: 0,
            changed: true,
        }
    }

    pub fn row() -> Self {
        Self::new(FlexDirection::Row)
    }

    pub fn column() -> Self {
        Self::new(FlexDirection::Column)
    }

    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn set_gap(&mut self, gap: u16) {
        if self.gap != gap {
            self.gap = gap;
            self.changed = true;
        }
    }

    pub fn set_justify(&mut self, justify: Justify) {
        if self.justify != justify {
            self.justify = justify;
            self.changed = true;
        }
    }

    fn main_length(&self, size: Size) -> u16 {
        match self.direction {
            FlexDirection::Row => size.columns,
            FlexDirection::Column => size.rows,
        }
    }

    fn child_style(&self, child: &LayoutChild) -> Style {
        let item = match child.layout_data {
            LayoutData::Flex(item) => item,
            _ => FlexItem::default(),
        };
        let preferred = child.preferred_size;
        let basis = item.basis.unwrap_or(self.main_length(preferred));

        let mut style = Style {
            flex_grow: item.grow,
            flex_shrink: item.shrink,
            flex_basis: cells(basis),
            ..Default::default()
        };
        // Cross axis: preferred length unless the container stretches it.
        match self.direction {
            FlexDirection::Row => style.size.height = cells(preferred.rows),
            FlexDirection::Column => style.size.width = cells(preferred.columns),
        }
        if child.has_override {
            match self.direction {
                FlexDirection::Row => style.min_size.width = cells(preferred.columns),
                FlexDirection::Column => style.min_size.height = cells(preferred.rows),
            }
        }
        style
    }

    fn compute(&self, area: Size, children: &[LayoutChild]) -> taffy::TaffyResult<Vec<(Position, Size)>> {
        let mut tree: TaffyTree<()> = TaffyTree::new();

        let nodes: Vec<NodeId> = children
            .iter()
            .map(|child| tree.new_leaf(self.child_style(child)))
            .collect::<Result<_, _>>()?;

        let gap = LengthPercentage::Length(self.gap as f32);
        let root = tree.new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: to_taffy_flex_direction(self.direction),
                justify_content: Some(to_taffy_justify(self.justify)),
                align_items: Some(TaffyAlignItems::FlexStart),
                gap: TaffySize {
                    width: gap,
                    height: gap,
                },
                size: TaffySize {
                    width: cells(area.columns),
                    height: cells(area.rows),
                },
                ..Default::default()
            },
            &nodes,
        )?;

        tree.compute_layout(
            root,
            TaffySize {
                width: AvailableSpace::Definite(area.columns as f32),
                height: AvailableSpace::Definite(area.rows as f32),
            },
        )?;

        nodes
            .iter()
            .map(|&node| {
                let layout = tree.layout(node)?;
                Ok((
                    Position::new(
                        layout.location.x.round() as i32,
                        layout.location.y.round() as i32,
                    ),
                    Size::new(to_cells(layout.size.width), to_cells(layout.size.height)),
                ))
            })
            .collect()
    }
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self::row()
    }
}

impl LayoutManager for FlexLayout {
    fn preferred_size(&self, children: &[LayoutChild]) -> Size {
        let gaps = self.gap as u32 * children.len().saturating_sub(1) as u32;
        let (mut main, mut cross) = (gaps, 0u16);
        for child in children {
            match self.direction {
                FlexDirection::Row => {
                    main += child.preferred_size.columns as u32;
                    cross = cross.max(child.preferred_size.rows);
                }
                FlexDirection::Column => {
                    main += child.preferred_size.rows as u32;
                    cross = cross.max(child.preferred_size.columns);
                }
            }
        }
        let main = main.min(u16::MAX as u32) as u16;
        match self.direction {
            FlexDirection::Row => Size::new(main, cross),
            FlexDirection::Column => Size::new(cross, main),
        }
    }

    fn do_layout(&mut self, area: Size, children: &mut [LayoutChild]) {
        self.changed = false;
        if children.is_empty() {
            return;
        }
        let placed = match self.compute(area, children) {
            Ok(placed) => placed,
            Err(err) => {
                warn!(%err, "flex layout failed, keeping previous bounds");
                return;
            }
        };
        for (child, (position, size)) in children.iter_mut().zip(placed) {
            // Overflowing minimums are clamped to the container.
            let left = (area.columns as i32 - position.column).max(0) as u16;
            let below = (area.rows as i32 - position.row).max(0) as u16;
            child.position = position;
            child.size = size.min(Size::new(left, below));
        }
    }

    fn has_changed(&self) -> bool {
        self.changed
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ComponentId;
    use slotmap::SlotMap;

    fn children(sizes: &[(u16, u16)]) -> Vec<LayoutChild> {
        let mut arena: SlotMap<ComponentId, ()> = SlotMap::with_key();
        sizes
            .iter()
            .map(|&(columns, rows)| LayoutChild {
                id: arena.insert(()),
                preferred_size: Size::new(columns, rows),
                has_override: false,
                layout_data: LayoutData::None,
                position: Position::ORIGIN,
                size: Size::ZERO,
            })
            .collect()
    }

    #[test]
    fn test_row_places_children_side_by_side() {
        let mut layout = FlexLayout::row().with_gap(1);
        let mut kids = children(&[(4, 1), (6, 1)]);
        assert_eq!(layout.preferred_size(&kids), Size::new(11, 1));

        layout.do_layout(Size::new(20, 3), &mut kids);
        assert_eq!(kids[0].position, Position::new(0, 0));
        assert_eq!(kids[0].size, Size::new(4, 1));
        assert_eq!(kids[1].position, Position::new(5, 0));
        assert_eq!(kids[1].size, Size::new(6, 1));
        assert!(!layout.has_changed());
    }

    #[test]
    fn test_grow_takes_free_space() {
        let mut layout = FlexLayout::column();
        let mut kids = children(&[(3, 2), (3, 2)]);
        kids[1].layout_data = FlexItem::grow(1.0).into();

        layout.do_layout(Size::new(3, 10), &mut kids);
        assert_eq!(kids[0].size.rows, 2);
        assert_eq!(kids[1].position, Position::new(0, 2));
        assert_eq!(kids[1].size.rows, 8);
    }

    #[test]
    fn test_override_clamped_to_container() {
        let mut layout = FlexLayout::row();
        let mut kids = children(&[(30, 1)]);
        kids[0].has_override = true;

        layout.do_layout(Size::new(10, 1), &mut kids);
        assert_eq!(kids[0].size, Size::new(10, 1));
    }
}
