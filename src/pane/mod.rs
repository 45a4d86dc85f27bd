//! Base Pane - the root of one component hierarchy.
//!
//! A pane owns:
//! - the [`ComponentTree`] with an internal holder container stacking the
//!   optional menu bar above the content component
//! - the focused interactable (zero or one)
//! - an invalid flag, a position on screen and a size
//! - pane-level listeners and an optional theme override
//!
//! # Input routing
//!
//! ```text
//! key → listeners.on_input (any Veto swallows it)
//!     → focused interactable (filter, then widget)
//!         Handled         → done
//!         MoveFocus(dir)  → lookup-map navigation, done
//!         Unhandled       → listeners.on_unhandled_input → GUI
//! ```
//!
//! # Focus after removal
//!
//! When the focused interactable leaves the tree, focus moves to the first
//! interactable that followed it in tree order (wrapping around), or is
//! cleared if none is left. The removed component gets no leave callback.

mod listener;

pub use listener::*;

use tracing::{trace, warn};

use crate::engine::{ComponentId, ComponentTree};
use crate::error::{GuiError, Result};
use crate::layout::{Alignment, GrowPolicy, LinearLayout, LinearLayoutData};
use crate::renderer::TextGraphics;
use crate::state::focus::{FocusChangeDirection, FocusDirection, InputResult, InteractableLookupMap};
use crate::state::keyboard::{default_focus_navigation, KeyStroke};
use crate::theme::Theme;
use crate::types::{Position, Size};

pub struct BasePane {
    tree: ComponentTree,
    /// Internal root: menu bar (if any) then content.
    holder: ComponentId,
    content: ComponentId,
    menu_bar: Option<ComponentId>,
    focused: Option<ComponentId>,
    position: Position,
    size: Size,
    strict_focus_change: bool,
    direction_based_movement: bool,
    invalid: bool,
    theme: Option<Theme>,
    listeners: Vec<(ListenerId, Box<dyn BasePaneListener>)>,
    next_listener_id: usize,
    lookup_map: InteractableLookupMap,
    /// Tree revision the lookup map was built from.
    lookup_revision: Option<u64>,
}

impl Default for BasePane {
    fn default() -> Self {
        Self::new()
    }
}

impl BasePane {
    /// An empty pane whose content is a vertical [`LinearLayout`] container.
    pub fn new() -> Self {
        let mut tree = ComponentTree::new();
        let holder = tree.create_container(LinearLayout::vertical());
        let content = tree.create_container(LinearLayout::vertical());
        let mut pane = Self {
            tree,
            holder,
            content,
            menu_bar: None,
            focused: None,
            position: Position::ORIGIN,
            size: Size::ZERO,
            strict_focus_change: false,
            direction_based_movement: true,
            invalid: true,
            theme: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            lookup_map: InteractableLookupMap::new(),
            lookup_revision: None,
        };
        if let Err(err) = pane.attach_content(content) {
            warn!(error = %err, "could not attach pane content");
        }
        pane
    }

    fn attach_content(&mut self, content: ComponentId) -> Result<()> {
        self.tree.add_component(self.holder, content)?;
        let fill = LinearLayoutData::new(Alignment::Fill, GrowPolicy::CanGrow);
        self.tree.set_layout_data(content, fill.into())
    }

    // =========================================================================
    // TREE ACCESS
    // =========================================================================

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Direct tree access. Focus is repaired lazily if the focused
    /// interactable is detached through this handle.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    /// The content component (below the menu bar).
    pub fn component(&self) -> ComponentId {
        self.content
    }

    /// Replace the content component. The old one is detached, not destroyed.
    pub fn set_component(&mut self, component: ComponentId) -> Result<()> {
        self.tree.node(component)?;
        if component == self.content {
            return Ok(());
        }
        // The holder is internal; it cannot sit below itself.
        if self.tree.is_attached_to(self.holder, component) {
            return Err(GuiError::CyclicHierarchy(component));
        }
        self.refresh_lookup_map();
        let previous = self.content;
        self.tree.remove_component(self.holder, previous)?;
        if let Err(err) = self.attach_content(component) {
            self.attach_content(previous)?;
            return Err(err);
        }
        if self.menu_bar == Some(component) {
            self.menu_bar = None;
        }
        self.content = component;
        self.repair_focus();
        Ok(())
    }

    /// Attach `child` under `parent`.
    pub fn add_component(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.tree.add_component(parent, child)
    }

    /// Detach `child` from `parent`, moving focus on if it was inside.
    pub fn remove_component(&mut self, parent: ComponentId, child: ComponentId) -> Result<bool> {
        self.refresh_lookup_map();
        let removed = self.tree.remove_component(parent, child)?;
        self.repair_focus();
        Ok(removed)
    }

    /// Free `id` and its subtree, moving focus on if it was inside.
    pub fn destroy_component(&mut self, id: ComponentId) -> Result<()> {
        self.refresh_lookup_map();
        self.tree.destroy_component(id)?;
        self.repair_focus();
        Ok(())
    }

    pub fn menu_bar(&self) -> Option<ComponentId> {
        self.menu_bar
    }

    /// Place `menu_bar` above the content; it precedes the content in focus
    /// order.
    pub fn set_menu_bar(&mut self, menu_bar: Option<ComponentId>) -> Result<()> {
        if let Some(bar) = menu_bar {
            self.tree.node(bar)?;
            if self.tree.is_attached_to(self.holder, bar) {
                return Err(GuiError::CyclicHierarchy(bar));
            }
        }
        self.refresh_lookup_map();
        if let Some(old) = self.menu_bar.take() {
            self.tree.remove_component(self.holder, old)?;
        }
        if let Some(bar) = menu_bar {
            self.tree.insert_component(self.holder, 0, bar)?;
            let fill = LinearLayoutData::new(Alignment::Fill, GrowPolicy::None);
            self.tree.set_layout_data(bar, fill.into())?;
            self.menu_bar = Some(bar);
        }
        self.repair_focus();
        Ok(())
    }

    /// True if `id` is part of this pane's hierarchy.
    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.tree.exists(id) && self.tree.is_attached_to(id, self.holder)
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    pub fn position(&self) -> Position {
        self.position
    }

    /// Screen position of the pane's top-left corner.
    pub fn set_position(&mut self, position: Position) {
        if self.position != position {
            self.position = position;
            self.lookup_revision = None;
            self.invalidate();
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.tree.apply_size(self.holder, size);
            self.invalidate();
        }
    }

    /// Re-flow stale containers.
    pub fn layout(&mut self) {
        self.tree.layout(self.holder);
    }

    /// `local` (relative to `id`) in pane coordinates.
    pub fn to_base_pane(&self, id: ComponentId, local: Position) -> Result<Position> {
        self.tree.node(id)?;
        self.tree
            .to_ancestor(id, self.holder, local)
            .ok_or(GuiError::DetachedComponentOperation(id))
    }

    /// `local` (relative to `id`) in screen coordinates.
    pub fn to_global(&self, id: ComponentId, local: Position) -> Result<Position> {
        Ok(self.to_base_pane(id, local)? + self.position)
    }

    /// Screen position of the cursor requested by the focused widget.
    pub fn cursor_position(&self) -> Option<Position> {
        let focused = self.focused_interactable()?;
        let local = self.tree.cursor_location(focused)?;
        self.to_global(focused, local).ok()
    }

    // =========================================================================
    // FOCUS
    // =========================================================================

    /// The focused interactable. Never reports a detached component.
    pub fn focused_interactable(&self) -> Option<ComponentId> {
        self.focused.filter(|id| self.is_attached(*id))
    }

    /// Move focus straight to `next` (or clear it with `None`).
    ///
    /// `next` must be an interactable attached to this pane. With strict
    /// focus change it must also be focusable right now.
    pub fn set_focused_interactable(&mut self, next: Option<ComponentId>) -> Result<()> {
        let direction = match next {
            Some(id) => {
                self.check_focus_target(id)?;
                FocusChangeDirection::Teleport
            }
            None => FocusChangeDirection::Reset,
        };
        self.repair_focus();
        self.change_focus(next, direction);
        Ok(())
    }

    fn check_focus_target(&self, id: ComponentId) -> Result<()> {
        self.tree.node(id)?;
        if !self.tree.is_interactable(id) {
            return Err(GuiError::NotFocusable(id));
        }
        if !self.is_attached(id) {
            return Err(GuiError::DetachedComponentOperation(id));
        }
        if self.strict_focus_change && !self.tree.is_focusable(id) {
            return Err(GuiError::NotFocusable(id));
        }
        Ok(())
    }

    /// Leave callback on the old focus, update, enter callback on the new.
    fn change_focus(&mut self, next: Option<ComponentId>, direction: FocusChangeDirection) {
        let previous = self.focused;
        if previous == next {
            return;
        }
        if let Some(prev) = previous {
            if let Some(widget) = self.tree.widget_mut(prev) {
                widget.on_leave_focus(direction, next);
            }
            self.tree.invalidate_component(prev);
        }
        self.focused = next;
        if let Some(next) = next {
            if let Some(widget) = self.tree.widget_mut(next) {
                widget.on_enter_focus(direction, previous);
            }
            self.tree.invalidate_component(next);
        }
        trace!(?previous, ?next, ?direction, "focus changed");
    }

    /// Move focus in `direction`. Returns true if it moved.
    pub fn move_focus(&mut self, direction: FocusDirection) -> bool {
        let direction = if self.direction_based_movement {
            direction
        } else {
            match direction {
                FocusDirection::Right | FocusDirection::Down => FocusDirection::Next,
                FocusDirection::Left | FocusDirection::Up => FocusDirection::Previous,
                other => other,
            }
        };
        self.repair_focus();
        self.refresh_lookup_map();
        match self.lookup_map.find(self.focused, direction) {
            Some(next) if Some(next) != self.focused => {
                self.change_focus(Some(next), direction.into());
                true
            }
            _ => false,
        }
    }

    /// Focus the first interactable in tree order.
    pub fn focus_first(&mut self) -> bool {
        self.refresh_lookup_map();
        let first = self.lookup_map.first();
        self.focus_candidate(first)
    }

    /// Focus the last interactable in tree order.
    pub fn focus_last(&mut self) -> bool {
        self.refresh_lookup_map();
        let last = self.lookup_map.last();
        self.focus_candidate(last)
    }

    fn focus_candidate(&mut self, candidate: Option<ComponentId>) -> bool {
        self.repair_focus();
        match candidate {
            Some(id) => {
                self.change_focus(Some(id), FocusChangeDirection::Teleport);
                true
            }
            None => false,
        }
    }

    /// If the focused interactable left the pane, hand focus to its first
    /// follower in the last known tree order, or clear it.
    fn repair_focus(&mut self) {
        let Some(lost) = self.focused else {
            return;
        };
        if self.is_attached(lost) {
            return;
        }

        let order: Vec<ComponentId> = self.lookup_map.entries().iter().map(|e| e.id).collect();
        self.refresh_lookup_map();

        let followers = match order.iter().position(|id| *id == lost) {
            Some(index) => order[index + 1..].iter().chain(&order[..index]).copied().collect(),
            None => Vec::new(),
        };
        let replacement = followers
            .into_iter()
            .find(|id| self.lookup_map.contains(*id))
            .or_else(|| self.lookup_map.first());

        self.focused = replacement;
        if let Some(next) = replacement {
            if let Some(widget) = self.tree.widget_mut(next) {
                widget.on_enter_focus(FocusChangeDirection::Removed, Some(lost));
            }
            self.tree.invalidate_component(next);
        }
        trace!(?lost, ?replacement, "focused component removed");
    }

    pub fn is_strict_focus_change(&self) -> bool {
        self.strict_focus_change
    }

    pub fn set_strict_focus_change(&mut self, strict: bool) {
        self.strict_focus_change = strict;
    }

    pub fn is_direction_based_movement(&self) -> bool {
        self.direction_based_movement
    }

    /// When disabled, arrow movement degrades to next/previous.
    pub fn set_direction_based_movement(&mut self, enabled: bool) {
        self.direction_based_movement = enabled;
    }

    // =========================================================================
    // LOOKUP MAP
    // =========================================================================

    /// Lay out, then rebuild the lookup map if the tree changed since the
    /// last build.
    fn refresh_lookup_map(&mut self) {
        self.tree.layout(self.holder);
        let revision = self.tree.revision();
        if self.lookup_revision == Some(revision) {
            return;
        }
        self.lookup_map.reset();
        self.tree
            .update_lookup_map(self.holder, self.position, &mut self.lookup_map);
        self.lookup_revision = Some(revision);
        trace!(entries = self.lookup_map.len(), revision, "lookup map rebuilt");
    }

    /// The up-to-date lookup map.
    pub fn lookup_map(&mut self) -> &InteractableLookupMap {
        self.refresh_lookup_map();
        &self.lookup_map
    }

    /// Interactable under `position` (screen coordinates).
    pub fn interactable_at(&mut self, position: Position) -> Option<ComponentId> {
        self.refresh_lookup_map();
        self.lookup_map.get_interactable_at(position)
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Route `key` through listeners and the focused interactable.
    ///
    /// Returns true if the pane consumed it (a veto counts as consumed).
    pub fn handle_input(&mut self, key: &KeyStroke) -> bool {
        if self.notify_input(key) == InputDelivery::Veto {
            return true;
        }
        self.repair_focus();

        let handled = match self.focused {
            Some(id) => match self.tree.dispatch_input(id, key) {
                InputResult::Handled => true,
                InputResult::MoveFocus(direction) => {
                    self.move_focus(direction);
                    true
                }
                InputResult::Unhandled => false,
            },
            None => match default_focus_navigation(key) {
                InputResult::MoveFocus(direction) => self.move_focus(direction),
                _ => false,
            },
        };
        if handled {
            return true;
        }
        self.notify_unhandled(key) == Propagation::Handled
    }

    fn notify_input(&mut self, key: &KeyStroke) -> InputDelivery {
        let mut listeners = std::mem::take(&mut self.listeners);
        let mut delivery = InputDelivery::Allow;
        for (_, listener) in listeners.iter_mut() {
            if listener.on_input(self, key) == InputDelivery::Veto {
                delivery = InputDelivery::Veto;
            }
        }
        self.listeners = listeners;
        delivery
    }

    fn notify_unhandled(&mut self, key: &KeyStroke) -> Propagation {
        let mut listeners = std::mem::take(&mut self.listeners);
        let mut propagation = Propagation::Unhandled;
        for (_, listener) in listeners.iter_mut() {
            if listener.on_unhandled_input(self, key) == Propagation::Handled {
                propagation = Propagation::Handled;
            }
        }
        self.listeners = listeners;
        propagation
    }

    pub fn add_listener(&mut self, listener: impl BasePaneListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // INVALIDATION / DRAW
    // =========================================================================

    /// Mark the pane and every component in it invalid.
    pub fn invalidate(&mut self) {
        self.invalid = true;
        self.tree.invalidate_subtree(self.holder);
    }

    /// True if the pane or anything in it needs a redraw.
    pub fn is_invalid(&self) -> bool {
        self.invalid || self.tree.is_invalid(self.holder)
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Theme used instead of the GUI's.
    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.theme = theme;
        self.invalidate();
    }

    /// Lay out and draw the whole pane at its position inside `graphics`.
    pub fn draw(&mut self, graphics: &mut TextGraphics<'_>, fallback_theme: &Theme) {
        self.repair_focus();
        self.tree.layout(self.holder);
        let theme = self.theme.as_ref().unwrap_or(fallback_theme);
        let mut area = graphics.sub_graphics(self.position, self.size);
        self.tree.draw(self.holder, &mut area, theme, self.focused);
        self.invalid = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EmptySpace, Widget};
    use crate::layout::AbsoluteLayout;
    use crate::renderer::FrameBuffer;
    use crate::state::keyboard::Key;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Tracker {
        name: &'static str,
        log: Log,
    }

    impl Widget for Tracker {
        fn preferred_size(&self) -> Size {
            Size::new(4, 1)
        }

        fn on_enter_focus(&mut self, direction: FocusChangeDirection, _previous: Option<ComponentId>) {
            self.log.lock().unwrap().push(format!("enter {} {direction:?}", self.name));
        }

        fn on_leave_focus(&mut self, direction: FocusChangeDirection, _next: Option<ComponentId>) {
            self.log.lock().unwrap().push(format!("leave {} {direction:?}", self.name));
        }
    }

    /// Pane with buttons at x = 0, 10, 20 on one row.
    fn row_pane(log: &Log) -> (BasePane, Vec<ComponentId>) {
        let mut pane = BasePane::new();
        pane.set_size(Size::new(40, 10));
        let row = pane.tree_mut().create_container(AbsoluteLayout::new());
        pane.set_component(row).unwrap();
        let mut ids = Vec::new();
        for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
            let id = pane.tree_mut().create_interactable(Tracker {
                name,
                log: log.clone(),
            });
            pane.add_component(row, id).unwrap();
            pane.tree_mut()
                .set_position(id, Position::new(10 * i as i32, 0))
                .unwrap();
            ids.push(id);
        }
        (pane, ids)
    }

    #[test]
    fn test_focus_change_sequence() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_focused_interactable(Some(ids[0])).unwrap();
        pane.set_focused_interactable(Some(ids[1])).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter a Teleport", "leave a Teleport", "enter b Teleport"]
        );
    }

    #[test]
    fn test_same_focus_is_noop() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_focused_interactable(Some(ids[0])).unwrap();
        pane.set_focused_interactable(Some(ids[0])).unwrap();
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_arrow_navigation_on_row() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_focused_interactable(Some(ids[1])).unwrap();
        assert!(pane.handle_input(&KeyStroke::new(Key::ArrowLeft)));
        assert_eq!(pane.focused_interactable(), Some(ids[0]));
        pane.handle_input(&KeyStroke::new(Key::ArrowRight));
        pane.handle_input(&KeyStroke::new(Key::ArrowRight));
        assert_eq!(pane.focused_interactable(), Some(ids[2]));
        // No wrap for spatial movement; the key is still consumed.
        assert!(pane.handle_input(&KeyStroke::new(Key::ArrowRight)));
        assert_eq!(pane.focused_interactable(), Some(ids[2]));
    }

    #[test]
    fn test_tab_without_focus() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.handle_input(&KeyStroke::new(Key::Tab));
        assert_eq!(pane.focused_interactable(), Some(ids[0]));

        pane.set_focused_interactable(None).unwrap();
        pane.handle_input(&KeyStroke::new(Key::BackTab));
        assert_eq!(pane.focused_interactable(), Some(ids[2]));
    }

    #[test]
    fn test_direction_based_movement_disabled() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_direction_based_movement(false);
        pane.set_focused_interactable(Some(ids[2])).unwrap();
        // Down degrades to Next, which wraps.
        pane.handle_input(&KeyStroke::new(Key::ArrowDown));
        assert_eq!(pane.focused_interactable(), Some(ids[0]));
    }

    #[test]
    fn test_remove_focused_moves_to_follower() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        let row = pane.component();
        pane.set_focused_interactable(Some(ids[1])).unwrap();
        log.lock().unwrap().clear();

        assert!(pane.remove_component(row, ids[1]).unwrap());
        assert_eq!(pane.focused_interactable(), Some(ids[2]));
        assert_eq!(*log.lock().unwrap(), vec!["enter c Removed"]);
    }

    #[test]
    fn test_remove_last_focused_wraps() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        let row = pane.component();
        pane.set_focused_interactable(Some(ids[2])).unwrap();
        pane.remove_component(row, ids[2]).unwrap();
        assert_eq!(pane.focused_interactable(), Some(ids[0]));
    }

    #[test]
    fn test_remove_only_interactable_clears_focus() {
        let log = Log::default();
        let mut pane = BasePane::new();
        let root = pane.component();
        let only = pane.tree_mut().create_interactable(Tracker {
            name: "only",
            log: log.clone(),
        });
        pane.add_component(root, only).unwrap();
        pane.set_focused_interactable(Some(only)).unwrap();
        pane.destroy_component(only).unwrap();
        assert_eq!(pane.focused_interactable(), None);
    }

    #[test]
    fn test_strict_focus_rejects_disabled() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.tree_mut().set_enabled(ids[0], false).unwrap();

        pane.set_strict_focus_change(true);
        assert!(matches!(
            pane.set_focused_interactable(Some(ids[0])),
            Err(GuiError::NotFocusable(_))
        ));
        pane.set_strict_focus_change(false);
        assert!(pane.set_focused_interactable(Some(ids[0])).is_ok());
    }

    #[test]
    fn test_detached_target_rejected() {
        let mut pane = BasePane::new();
        let loose = pane.tree_mut().create_interactable(EmptySpace::default());
        assert!(matches!(
            pane.set_focused_interactable(Some(loose)),
            Err(GuiError::DetachedComponentOperation(_))
        ));
        assert!(matches!(
            pane.to_global(loose, Position::ORIGIN),
            Err(GuiError::DetachedComponentOperation(_))
        ));
    }

    #[test]
    fn test_set_component_rejects_internal_holder() {
        let mut pane = BasePane::new();
        let content = pane.component();
        let holder = pane.tree().parent(content).unwrap();

        assert!(matches!(
            pane.set_component(holder),
            Err(GuiError::CyclicHierarchy(id)) if id == holder
        ));
        assert!(matches!(
            pane.set_menu_bar(Some(holder)),
            Err(GuiError::CyclicHierarchy(_))
        ));
        // Nothing moved.
        assert_eq!(pane.component(), content);
        assert_eq!(pane.tree().parent(content), Some(holder));
        assert!(pane.is_attached(content));
    }

    #[test]
    fn test_menu_bar_promoted_to_content() {
        let mut pane = BasePane::new();
        let bar = pane.tree_mut().create_container(LinearLayout::horizontal());
        pane.set_menu_bar(Some(bar)).unwrap();
        pane.set_component(bar).unwrap();
        assert_eq!(pane.component(), bar);
        assert_eq!(pane.menu_bar(), None);
        assert!(pane.is_attached(bar));
    }

    struct VetoAll;

    impl BasePaneListener for VetoAll {
        fn on_input(&mut self, _pane: &BasePane, _key: &KeyStroke) -> InputDelivery {
            InputDelivery::Veto
        }
    }

    struct ClaimUnhandled(Arc<Mutex<usize>>);

    impl BasePaneListener for ClaimUnhandled {
        fn on_unhandled_input(&mut self, _pane: &BasePane, _key: &KeyStroke) -> Propagation {
            *self.0.lock().unwrap() += 1;
            Propagation::Handled
        }
    }

    #[test]
    fn test_listener_veto_blocks_delivery() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_focused_interactable(Some(ids[0])).unwrap();
        let veto = pane.add_listener(VetoAll);
        assert!(pane.handle_input(&KeyStroke::new(Key::Tab)));
        assert_eq!(pane.focused_interactable(), Some(ids[0]));

        assert!(pane.remove_listener(veto));
        pane.handle_input(&KeyStroke::new(Key::Tab));
        assert_eq!(pane.focused_interactable(), Some(ids[1]));
    }

    #[test]
    fn test_unhandled_listener_claims_key() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_focused_interactable(Some(ids[0])).unwrap();
        assert!(!pane.handle_input(&KeyStroke::char('q')));

        let count = Arc::new(Mutex::new(0));
        pane.add_listener(ClaimUnhandled(count.clone()));
        assert!(pane.handle_input(&KeyStroke::char('q')));
        assert!(pane.handle_input(&KeyStroke::new(Key::Tab)));
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_menu_bar_comes_first() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        let bar = pane.tree_mut().create_interactable(Tracker {
            name: "menu",
            log: log.clone(),
        });
        pane.set_menu_bar(Some(bar)).unwrap();
        assert_eq!(pane.lookup_map().first(), Some(bar));
        assert_eq!(pane.to_base_pane(ids[0], Position::ORIGIN).unwrap(), Position::new(0, 1));
    }

    #[test]
    fn test_invalidate_and_draw() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        let theme = Theme::default();
        let mut buffer = FrameBuffer::new(40, 10);

        pane.draw(&mut TextGraphics::new(&mut buffer), &theme);
        assert!(!pane.is_invalid());
        assert!(!pane.tree().is_invalid(ids[1]));

        pane.invalidate();
        assert!(pane.is_invalid());
        assert!(pane.tree().is_invalid(pane.component()));
        assert!(pane.tree().is_invalid(ids[1]));

        pane.draw(&mut TextGraphics::new(&mut buffer), &theme);
        assert!(!pane.is_invalid());
        for id in ids {
            assert!(!pane.tree().is_invalid(id));
        }
    }

    #[test]
    fn test_global_position_includes_pane_offset() {
        let log = Log::default();
        let (mut pane, ids) = row_pane(&log);
        pane.set_position(Position::new(3, 2));
        assert_eq!(
            pane.to_global(ids[2], Position::new(1, 0)).unwrap(),
            Position::new(24, 2)
        );
        assert_eq!(pane.interactable_at(Position::new(14, 2)), Some(ids[1]));
    }
}
