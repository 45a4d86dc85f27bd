//! Linear layout - stack children along one axis.
//!
//! Children are placed one after another in insertion order, `spacing` cells
//! apart. Along the stacking axis each child gets its preferred length;
//! leftover space goes to children with [`GrowPolicy::CanGrow`], missing
//! space is taken from the last children first. Across the axis each child
//! is aligned according to its [`Alignment`].

use crate::types::{Position, Size};

use super::{shrink_to_fit, LayoutChild, LayoutData, LayoutManager};

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// Cross-axis placement of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Beginning,
    Center,
    End,
    /// Stretch to the full cross-axis length.
    Fill,
}

/// Whether a child takes a share of leftover space on the stacking axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowPolicy {
    #[default]
    None,
    CanGrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearLayoutData {
    pub alignment: Alignment,
    pub grow_policy: GrowPolicy,
}

impl LinearLayoutData {
    pub fn new(alignment: Alignment, grow_policy: GrowPolicy) -> Self {
        Self {
            alignment,
            grow_policy,
        }
    }
}

impl From<LinearLayoutData> for LayoutData {
    fn from(data: LinearLayoutData) -> Self {
        LayoutData::Linear(data)
    }
}

fn linear_data(child: &LayoutChild) -> LinearLayoutData {
    match child.layout_data {
        LayoutData::Linear(data) => data,
        _ => LinearLayoutData::default(),
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Clone)]
pub struct LinearLayout {
    direction: Direction,
    spacing: u16,
    changed: bool,
}

impl LinearLayout {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            spacing: 0,
            changed: true,
        }
    }

    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Builder form of [`set_spacing`](Self::set_spacing).
    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn spacing(&self) -> u16 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: u16) {
        if self.spacing != spacing {
            self.spacing = spacing;
            self.changed = true;
        }
    }

    /// (stacking axis, cross axis)
    fn split(&self, size: Size) -> (u16, u16) {
        match self.direction {
            Direction::Vertical => (size.rows, size.columns),
            Direction::Horizontal => (size.columns, size.rows),
        }
    }

    fn join_size(&self, main: u16, cross: u16) -> Size {
        match self.direction {
            Direction::Vertical => Size::new(cross, main),
            Direction::Horizontal => Size::new(main, cross),
        }
    }

    fn join_position(&self, main: u32, cross: u16) -> Position {
        match self.direction {
            Direction::Vertical => Position::new(cross as i32, main as i32),
            Direction::Horizontal => Position::new(main as i32, cross as i32),
        }
    }

    fn total_spacing(&self, count: usize) -> u32 {
        self.spacing as u32 * count.saturating_sub(1) as u32
    }
}

impl Default for LinearLayout {
    fn default() -> Self {
        Self::vertical()
    }
}

impl LayoutManager for LinearLayout {
    fn preferred_size(&self, children: &[LayoutChild]) -> Size {
        let mut main: u32 = self.total_spacing(children.len());
        let mut cross: u16 = 0;
        for child in children {
            let (m, c) = self.split(child.preferred_size);
            main += m as u32;
            cross = cross.max(c);
        }
        self.join_size(main.min(u16::MAX as u32) as u16, cross)
    }

    fn do_layout(&mut self, area: Size, children: &mut [LayoutChild]) {
        self.changed = false;
        if children.is_empty() {
            return;
        }
        let (main_available, cross_available) = self.split(area);

        let mut lengths: Vec<u16> = children
            .iter()
            .map(|c| self.split(c.preferred_size).0.min(main_available))
            .collect();
        let overrides: Vec<bool> = children.iter().map(|c| c.has_override).collect();

        let wanted: u32 =
            lengths.iter().map(|&l| l as u32).sum::<u32>() + self.total_spacing(children.len());
        let available = main_available as u32;

        if wanted > available {
            shrink_to_fit(&mut lengths, &overrides, wanted - available);
        } else if wanted < available {
            let growers: Vec<usize> = children
                .iter()
                .enumerate()
                .filter(|(_, c)| linear_data(c).grow_policy == GrowPolicy::CanGrow)
                .map(|(i, _)| i)
                .collect();
            if !growers.is_empty() {
                let extra = available - wanted;
                let share = extra / growers.len() as u32;
                let remainder = (extra % growers.len() as u32) as usize;
                for (n, &i) in growers.iter().enumerate() {
                    let bonus = share + u32::from(n < remainder);
                    lengths[i] = (lengths[i] as u32 + bonus).min(u16::MAX as u32) as u16;
                }
            }
        }

        let mut cursor: u32 = 0;
        for (child, &length) in children.iter_mut().zip(&lengths) {
            let start = cursor;
            cursor += length as u32 + self.spacing as u32;

            // Anything pushed past the end by spacing collapses to nothing.
            let length = if start >= available {
                0
            } else {
                length.min((available - start) as u16)
            };

            let preferred_cross = self.split(child.preferred_size).1.min(cross_available);
            let (cross_start, cross_length) = match linear_data(child).alignment {
                Alignment::Beginning => (0, preferred_cross),
                Alignment::Center => ((cross_available - preferred_cross) / 2, preferred_cross),
                Alignment::End => (cross_available - preferred_cross, preferred_cross),
                Alignment::Fill => (0, cross_available),
            };

            child.position = self.join_position(start.min(available), cross_start);
            child.size = self.join_size(length, cross_length);
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
    fn test_vertical_stacking() {
        let mut layout = LinearLayout::vertical().with_spacing(1);
        let mut kids = children(&[(5, 1), (3, 2)]);
        assert_eq!(layout.preferred_size(&kids), Size::new(5, 4));

        layout.do_layout(Size::new(10, 10), &mut kids);
        assert_eq!(kids[0].position, Position::new(0, 0));
        assert_eq!(kids[0].size, Size::new(5, 1));
        assert_eq!(kids[1].position, Position::new(0, 2));
        assert_eq!(kids[1].size, Size::new(3, 2));
        assert!(!layout.has_changed());
    }

    #[test]
    fn test_horizontal_alignment() {
        let mut layout = LinearLayout::horizontal();
        let mut kids = children(&[(2, 1), (2, 1), (2, 1)]);
        kids[0].layout_data = LinearLayoutData::new(Alignment::Center, GrowPolicy::None).into();
        kids[1].layout_data = LinearLayoutData::new(Alignment::End, GrowPolicy::None).into();
        kids[2].layout_data = LinearLayoutData::new(Alignment::Fill, GrowPolicy::None).into();

        layout.do_layout(Size::new(10, 5), &mut kids);
        assert_eq!(kids[0].position, Position::new(0, 2));
        assert_eq!(kids[1].position, Position::new(2, 4));
        assert_eq!(kids[2].position, Position::new(4, 0));
        assert_eq!(kids[2].size, Size::new(2, 5));
    }

    #[test]
    fn test_grow_shares_leftover() {
        let mut layout = LinearLayout::vertical();
        let mut kids = children(&[(1, 1), (1, 1), (1, 1)]);
        let grow = LinearLayoutData::new(Alignment::Fill, GrowPolicy::CanGrow).into();
        kids[0].layout_data = grow;
        kids[2].layout_data = grow;

        layout.do_layout(Size::new(4, 8), &mut kids);
        // 5 spare rows: 3 to the first grower, 2 to the second.
        assert_eq!(kids[0].size, Size::new(4, 4));
        assert_eq!(kids[1].position, Position::new(0, 4));
        assert_eq!(kids[2].size, Size::new(4, 3));
    }

    #[test]
    fn test_override_kept_while_others_shrink() {
        let mut layout = LinearLayout::vertical();
        let mut kids = children(&[(1, 4), (1, 4)]);
        kids[0].has_override = true;

        layout.do_layout(Size::new(1, 5), &mut kids);
        assert_eq!(kids[0].size.rows, 4);
        assert_eq!(kids[1].size.rows, 1);
    }

    #[test]
    fn test_override_clamped_to_available() {
        let mut layout = LinearLayout::vertical();
        let mut kids = children(&[(1, 9)]);
        kids[0].has_override = true;

        layout.do_layout(Size::new(1, 3), &mut kids);
        assert_eq!(kids[0].size, Size::new(1, 3));
    }

    #[test]
    fn test_set_spacing_marks_changed() {
        let mut layout = LinearLayout::vertical();
        layout.do_layout(Size::new(1, 1), &mut []);
        assert!(!layout.has_changed());
        layout.set_spacing(2);
        assert!(layout.has_changed());
    }
}
