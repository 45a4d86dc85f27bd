//! Absolute layout - children stay where they were put.
//!
//! Each child keeps its current position and gets its preferred size,
//! clipped to what is left of the container from that position.

use crate::types::Size;

use super::{LayoutChild, LayoutManager};

#[derive(Debug, Clone)]
pub struct AbsoluteLayout {
    changed: bool,
}

impl AbsoluteLayout {
    pub fn new() -> Self {
        Self { changed: true }
    }
}

impl Default for AbsoluteLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager for AbsoluteLayout {
    fn preferred_size(&self, children: &[LayoutChild]) -> Size {
        children.iter().fold(Size::ZERO, |extent, child| {
            let right = (child.position.column.max(0) as u32 + child.preferred_size.columns as u32)
                .min(u16::MAX as u32) as u16;
            let bottom = (child.position.row.max(0) as u32 + child.preferred_size.rows as u32)
                .min(u16::MAX as u32) as u16;
            extent.max(Size::new(right, bottom))
        })
    }

    fn do_layout(&mut self, area: Size, children: &mut [LayoutChild]) {
        self.changed = false;
        for child in children {
            let left = (area.columns as i32 - child.position.column.max(0)).max(0) as u16;
            let below = (area.rows as i32 - child.position.row.max(0)).max(0) as u16;
            child.size = child.preferred_size.min(Size::new(left, below));
        }
    }

    fn has_changed(&self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ComponentId;
    use crate::layout::LayoutData;
    use crate::types::Position;
    use slotmap::SlotMap;

    fn child(arena: &mut SlotMap<ComponentId, ()>, at: Position, preferred: Size) -> LayoutChild {
        LayoutChild {
            id: arena.insert(()),
            preferred_size: preferred,
            has_override: false,
            layout_data: LayoutData::None,
            position: at,
            size: Size::ZERO,
        }
    }

    #[test]
    fn test_positions_kept_sizes_clipped() {
        let mut arena = SlotMap::with_key();
        let mut kids = vec![
            child(&mut arena, Position::new(2, 1), Size::new(3, 1)),
            child(&mut arena, Position::new(8, 0), Size::new(5, 2)),
        ];
        let mut layout = AbsoluteLayout::new();
        assert_eq!(layout.preferred_size(&kids), Size::new(13, 2));

        layout.do_layout(Size::new(10, 4), &mut kids);
        assert_eq!(kids[0].position, Position::new(2, 1));
        assert_eq!(kids[0].size, Size::new(3, 1));
        assert_eq!(kids[1].size, Size::new(2, 2));
        assert!(!layout.has_changed());
    }
}
