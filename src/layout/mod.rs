//! GUI Framework - Layout Module
//!
//! A container hands its assigned size and its visible children to a
//! [`LayoutManager`], which answers two questions:
//!
//! 1. How big would the container like to be? (`preferred_size`)
//! 2. Where does each child go and how big is it? (`do_layout`)
//!
//! # Policies
//!
//! - [`LinearLayout`]: stack children vertically or horizontally
//! - [`AbsoluteLayout`]: children keep the positions they were given
//! - [`FlexLayout`]: flexbox via [Taffy](https://github.com/DioxusLabs/taffy)
//!
//! # Preferred-size overrides
//!
//! A child whose preferred size was set explicitly (`has_override`) keeps at
//! least that size. Policies only shrink it once every other child has been
//! shrunk, and then only down to the space actually available.

mod absolute;
mod linear;
mod taffy_bridge;

pub use absolute::*;
pub use linear::*;
pub use taffy_bridge::*;

use crate::engine::ComponentId;
use crate::types::{Position, Size};

// =============================================================================
// LAYOUT DATA
// =============================================================================

/// Per-child hints, interpreted by the policy that understands them.
///
/// A policy ignores data meant for another policy and uses its defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutData {
    #[default]
    None,
    Linear(LinearLayoutData),
    Flex(FlexItem),
}

// =============================================================================
// LAYOUT CHILD
// =============================================================================

/// One child as seen by a layout pass.
///
/// `position` and `size` carry the current bounds in and the assigned bounds
/// out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutChild {
    pub id: ComponentId,
    pub preferred_size: Size,
    /// The preferred size is an explicit override.
    pub has_override: bool,
    pub layout_data: LayoutData,
    pub position: Position,
    pub size: Size,
}

// =============================================================================
// LAYOUT MANAGER
// =============================================================================

pub trait LayoutManager: Send {
    /// Size the container wants for these children.
    fn preferred_size(&self, children: &[LayoutChild]) -> Size;

    /// Assign `position` and `size` to every child inside `area`.
    fn do_layout(&mut self, area: Size, children: &mut [LayoutChild]);

    /// True when a setting changed since the last `do_layout`.
    fn has_changed(&self) -> bool;
}

/// Distribute `excess` cells of shrinking over `lengths`, last child first.
///
/// Children without an override give way before children with one.
pub(crate) fn shrink_to_fit(lengths: &mut [u16], overrides: &[bool], mut excess: u32) {
    for pass_override in [false, true] {
        for (length, _) in lengths
            .iter_mut()
            .zip(overrides)
            .rev()
            .filter(|(_, has_override)| **has_override == pass_override)
        {
            if excess == 0 {
                return;
            }
            let cut = excess.min(*length as u32);
            *length -= cut as u16;
            excess -= cut;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_prefers_non_override() {
        let mut lengths = [4, 4, 4];
        shrink_to_fit(&mut lengths, &[true, false, false], 6);
        assert_eq!(lengths, [4, 2, 0]);
    }

    #[test]
    fn test_shrink_reaches_override_last() {
        let mut lengths = [4, 4];
        shrink_to_fit(&mut lengths, &[true, false], 6);
        assert_eq!(lengths, [2, 0]);
    }
}
