//! Focus System - Interactable lookup map and directional search
//!
//! The lookup map is a transient index of every visible, enabled, focusable
//! interactable in a pane, recorded in tree (pre-order) order together with
//! its resolved global position. The pane rebuilds it lazily before the first
//! navigation query that follows a tree or layout change.
//!
//! # Search rules
//!
//! - `Next` / `Previous`: tree order, wrapping at both ends.
//! - `Left` / `Right` / `Up` / `Down`: candidates whose top-left corner lies
//!   strictly inside the requested half-plane relative to the current
//!   interactable's top-left corner. The winner has the smallest distance
//!   along the primary axis, then the smallest distance along the secondary
//!   axis, then the earliest tree order. No candidate means no move; there
//!   is no wrap for spatial directions.
//!
//! # Example
//!
//! ```ignore
//! let mut map = InteractableLookupMap::new();
//! map.add(a, Position::new(0, 0), Size::new(5, 1));
//! map.add(b, Position::new(10, 0), Size::new(5, 1));
//! assert_eq!(map.find(Some(b), FocusDirection::Left), Some(a));
//! ```

use crate::engine::ComponentId;
use crate::types::{Position, Size};

// =============================================================================
// DIRECTIONS AND RESULTS
// =============================================================================

/// A requested focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    Next,
    Previous,
    Left,
    Right,
    Up,
    Down,
}

impl FocusDirection {
    /// True for the four spatial directions.
    pub fn is_spatial(self) -> bool {
        !matches!(self, FocusDirection::Next | FocusDirection::Previous)
    }
}

/// Why focus changed, reported to `on_enter_focus` / `on_leave_focus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusChangeDirection {
    Next,
    Previous,
    Left,
    Right,
    Up,
    Down,
    /// Focus was set directly by the application.
    Teleport,
    /// Focus was cleared or reset.
    Reset,
    /// The previously focused interactable left the tree.
    Removed,
}

impl From<FocusDirection> for FocusChangeDirection {
    fn from(direction: FocusDirection) -> Self {
        match direction {
            FocusDirection::Next => FocusChangeDirection::Next,
            FocusDirection::Previous => FocusChangeDirection::Previous,
            FocusDirection::Left => FocusChangeDirection::Left,
            FocusDirection::Right => FocusChangeDirection::Right,
            FocusDirection::Up => FocusChangeDirection::Up,
            FocusDirection::Down => FocusChangeDirection::Down,
        }
    }
}

/// What an interactable did with a key stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputResult {
    /// Not used; the key keeps bubbling outwards.
    Unhandled,
    /// Consumed.
    Handled,
    /// Consumed, and focus should move.
    MoveFocus(FocusDirection),
}

// =============================================================================
// LOOKUP MAP
// =============================================================================

/// One focus candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupEntry {
    pub id: ComponentId,
    /// Global top-left corner.
    pub position: Position,
    pub size: Size,
}

impl LookupEntry {
    fn contains(&self, point: Position) -> bool {
        self.size.contains(point - self.position)
    }
}

/// Spatial index over focusable interactables.
#[derive(Debug, Clone, Default)]
pub struct InteractableLookupMap {
    entries: Vec<LookupEntry>,
}

impl InteractableLookupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Record an interactable. Call in tree order; order is the final tie-break.
    pub fn add(&mut self, id: ComponentId, position: Position, size: Size) {
        self.entries.push(LookupEntry { id, position, size });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in tree order.
    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    /// Tree-order index of `id`, if recorded.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn first(&self) -> Option<ComponentId> {
        self.entries.first().map(|e| e.id)
    }

    pub fn last(&self) -> Option<ComponentId> {
        self.entries.last().map(|e| e.id)
    }

    /// The interactable covering `point` (global coordinates).
    ///
    /// When entries overlap, the one recorded last wins since it was drawn
    /// on top.
    pub fn get_interactable_at(&self, point: Position) -> Option<ComponentId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.contains(point))
            .map(|e| e.id)
    }

    /// Best candidate for moving focus from `current` in `direction`.
    ///
    /// With no current focus (or a current focus that is not in the map),
    /// `Next` and the spatial directions pick the first entry and `Previous`
    /// picks the last.
    pub fn find(&self, current: Option<ComponentId>, direction: FocusDirection) -> Option<ComponentId> {
        let index = current.and_then(|id| self.index_of(id));
        let Some(index) = index else {
            return match direction {
                FocusDirection::Previous => self.last(),
                _ => self.first(),
            };
        };

        match direction {
            FocusDirection::Next => self.find_next_from(index),
            FocusDirection::Previous => self.find_previous_from(index),
            spatial => {
                let entry = self.entries[index];
                self.find_in_direction(entry.position, spatial, Some(entry.id))
            }
        }
    }

    /// Next entry in tree order after `current`, wrapping.
    pub fn find_next(&self, current: ComponentId) -> Option<ComponentId> {
        match self.index_of(current) {
            Some(index) => self.find_next_from(index),
            None => self.first(),
        }
    }

    /// Previous entry in tree order before `current`, wrapping.
    pub fn find_previous(&self, current: ComponentId) -> Option<ComponentId> {
        match self.index_of(current) {
            Some(index) => self.find_previous_from(index),
            None => self.last(),
        }
    }

    fn find_next_from(&self, index: usize) -> Option<ComponentId> {
        if self.entries.is_empty() {
            return None;
        }
        let next = (index + 1) % self.entries.len();
        Some(self.entries[next].id)
    }

    fn find_previous_from(&self, index: usize) -> Option<ComponentId> {
        if self.entries.is_empty() {
            return None;
        }
        let len = self.entries.len();
        let prev = (index + len - 1) % len;
        Some(self.entries[prev].id)
    }

    /// Nearest entry strictly in the half-plane `direction` of `from`.
    ///
    /// `exclude` is skipped (normally the current focus). `Next`/`Previous`
    /// have no half-plane and return `None` here.
    pub fn find_in_direction(
        &self,
        from: Position,
        direction: FocusDirection,
        exclude: Option<ComponentId>,
    ) -> Option<ComponentId> {
        let mut best: Option<((u64, u64), ComponentId)> = None;

        // Entries are already in tree order, so keeping the first minimum
        // applies the final tie-break.
        for entry in &self.entries {
            if Some(entry.id) == exclude {
                continue;
            }
            let Some(score) = direction_score(from, entry.position, direction) else {
                continue;
            };
            match best {
                Some((best_score, _)) if best_score <= score => {}
                _ => best = Some((score, entry.id)),
            }
        }

        best.map(|(_, id)| id)
    }
}

/// (primary distance, secondary distance) if `to` lies strictly in the
/// half-plane of `direction` as seen from `from`.
fn direction_score(from: Position, to: Position, direction: FocusDirection) -> Option<(u64, u64)> {
    // i64 so that positions at opposite ends of the i32 range cannot overflow.
    let dx = i64::from(to.column) - i64::from(from.column);
    let dy = i64::from(to.row) - i64::from(from.row);
    let (primary, secondary) = match direction {
        FocusDirection::Left if dx < 0 => (-dx, dy.abs()),
        FocusDirection::Right if dx > 0 => (dx, dy.abs()),
        FocusDirection::Up if dy < 0 => (-dy, dx.abs()),
        FocusDirection::Down if dy > 0 => (dy, dx.abs()),
        _ => return None,
    };
    Some((primary.unsigned_abs(), secondary.unsigned_abs()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ComponentId> {
        let mut arena: SlotMap<ComponentId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn row_of_three() -> (InteractableLookupMap, Vec<ComponentId>) {
        let ids = ids(3);
        let mut map = InteractableLookupMap::new();
        map.add(ids[0], Position::new(0, 0), Size::new(5, 1));
        map.add(ids[1], Position::new(10, 0), Size::new(5, 1));
        map.add(ids[2], Position::new(20, 0), Size::new(5, 1));
        (map, ids)
    }

    #[test]
    fn test_horizontal_row() {
        let (map, ids) = row_of_three();
        assert_eq!(map.find(Some(ids[1]), FocusDirection::Left), Some(ids[0]));
        assert_eq!(map.find(Some(ids[1]), FocusDirection::Right), Some(ids[2]));
    }

    #[test]
    fn test_extreme_positions_do_not_overflow() {
        let ids = ids(3);
        let mut map = InteractableLookupMap::new();
        map.add(ids[0], Position::new(i32::MIN, i32::MIN), Size::new(1, 1));
        map.add(ids[1], Position::new(i32::MAX, 0), Size::new(1, 1));
        map.add(ids[2], Position::new(0, i32::MAX), Size::new(1, 1));
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Right), Some(ids[2]));
        assert_eq!(map.find(Some(ids[1]), FocusDirection::Left), Some(ids[2]));
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Down), Some(ids[1]));
        assert_eq!(map.find(Some(ids[2]), FocusDirection::Up), Some(ids[1]));
        assert_eq!(map.get_interactable_at(Position::new(i32::MAX, 0)), Some(ids[1]));
        assert_eq!(map.get_interactable_at(Position::new(i32::MIN, 0)), None);
    }

    #[test]
    fn test_no_wrap_at_edge() {
        let (map, ids) = row_of_three();
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Left), None);
        assert_eq!(map.find(Some(ids[2]), FocusDirection::Right), None);
        assert_eq!(map.find(Some(ids[1]), FocusDirection::Up), None);
        assert_eq!(map.find(Some(ids[1]), FocusDirection::Down), None);
    }

    #[test]
    fn test_next_previous_wrap() {
        let (map, ids) = row_of_three();
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Next), Some(ids[1]));
        assert_eq!(map.find(Some(ids[2]), FocusDirection::Next), Some(ids[0]));
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Previous), Some(ids[2]));
    }

    #[test]
    fn test_no_current_focus() {
        let (map, ids) = row_of_three();
        assert_eq!(map.find(None, FocusDirection::Next), Some(ids[0]));
        assert_eq!(map.find(None, FocusDirection::Previous), Some(ids[2]));
        assert_eq!(map.find(None, FocusDirection::Down), Some(ids[0]));
    }

    #[test]
    fn test_secondary_axis_tie_break() {
        let ids = ids(3);
        let mut map = InteractableLookupMap::new();
        map.add(ids[0], Position::new(10, 5), Size::new(1, 1));
        // Same horizontal distance, one is further away vertically
        map.add(ids[1], Position::new(0, 9), Size::new(1, 1));
        map.add(ids[2], Position::new(0, 6), Size::new(1, 1));
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Left), Some(ids[2]));
    }

    #[test]
    fn test_tree_order_final_tie_break() {
        let ids = ids(3);
        let mut map = InteractableLookupMap::new();
        map.add(ids[0], Position::new(5, 5), Size::new(1, 1));
        // Identical geometry, so only tree order separates them
        map.add(ids[1], Position::new(0, 5), Size::new(1, 1));
        map.add(ids[2], Position::new(0, 5), Size::new(1, 1));
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Left), Some(ids[1]));
    }

    #[test]
    fn test_same_column_is_not_in_half_plane() {
        let ids = ids(2);
        let mut map = InteractableLookupMap::new();
        map.add(ids[0], Position::new(4, 0), Size::new(1, 1));
        map.add(ids[1], Position::new(4, 3), Size::new(1, 1));
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Left), None);
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Right), None);
        assert_eq!(map.find(Some(ids[0]), FocusDirection::Down), Some(ids[1]));
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        let (map, ids) = row_of_three();
        let first = map.find(Some(ids[1]), FocusDirection::Left);
        for _ in 0..10 {
            assert_eq!(map.find(Some(ids[1]), FocusDirection::Left), first);
        }
    }

    #[test]
    fn test_left_then_right_returns_no_farther() {
        let (map, ids) = row_of_three();
        let left = map.find(Some(ids[1]), FocusDirection::Left).expect("left exists");
        let back = map.find(Some(left), FocusDirection::Right).expect("right exists");
        let origin_x = map.entries()[1].position.column;
        let back_x = map.entries()[map.index_of(back).unwrap()].position.column;
        assert!(back_x <= origin_x);
    }

    #[test]
    fn test_get_interactable_at() {
        let (map, ids) = row_of_three();
        assert_eq!(map.get_interactable_at(Position::new(12, 0)), Some(ids[1]));
        assert_eq!(map.get_interactable_at(Position::new(7, 0)), None);
        assert_eq!(map.get_interactable_at(Position::new(0, 1)), None);
    }

    #[test]
    fn test_single_entry_next_is_itself() {
        let ids = ids(1);
        let mut map = InteractableLookupMap::new();
        map.add(ids[0], Position::ORIGIN, Size::new(1, 1));
        assert_eq!(map.find_next(ids[0]), Some(ids[0]));
        assert_eq!(map.find_previous(ids[0]), Some(ids[0]));
    }

    #[test]
    fn test_reset() {
        let (mut map, _) = row_of_three();
        map.reset();
        assert!(map.is_empty());
        assert_eq!(map.find(None, FocusDirection::Next), None);
    }
}
