//! Border renderers.
//!
//! A border component wraps one child. The renderer decides how much room
//! the frame takes (the insets), where the child's content area starts (the
//! wrapped offset) and how the frame is painted.
//!
//! Characters are looked up in the theme under the names in [`border_chars`]
//! and fall back to the style's built-in glyphs.

use crate::renderer::TextGraphics;
use crate::theme::ThemeDefinition;
use crate::types::{Position, Size};

/// Theme character names consulted by [`LineBorder`].
pub mod border_chars {
    pub const HORIZONTAL: &str = "HORIZONTAL_LINE";
    pub const VERTICAL: &str = "VERTICAL_LINE";
    pub const TOP_LEFT: &str = "TOP_LEFT_CORNER";
    pub const TOP_RIGHT: &str = "TOP_RIGHT_CORNER";
    pub const BOTTOM_LEFT: &str = "BOTTOM_LEFT_CORNER";
    pub const BOTTOM_RIGHT: &str = "BOTTOM_RIGHT_CORNER";
}

pub trait BorderRenderer: Send {
    /// Top-left corner of the content area inside the border.
    fn wrapped_offset(&self) -> Position;

    /// Total columns and rows taken by the frame.
    fn insets(&self) -> Size;

    /// Size left for the child when the border is `border_size`.
    fn wrapped_size(&self, border_size: Size) -> Size {
        border_size.saturating_sub(self.insets())
    }

    /// Size the border needs to give the child `wrapped`.
    fn border_size(&self, wrapped: Size) -> Size {
        wrapped.saturating_add(self.insets())
    }

    fn draw(&self, graphics: &mut TextGraphics<'_>, title: &str, definition: &ThemeDefinition);
}

// =============================================================================
// LINE BORDER
// =============================================================================

/// Box-drawing style for [`LineBorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Heavy,
}

impl LineStyle {
    /// Built-in glyphs: horizontal, vertical, then corners TL, TR, BL, BR.
    fn glyphs(self) -> [char; 6] {
        match self {
            LineStyle::Single => ['─', '│', '┌', '┐', '└', '┘'],
            LineStyle::Double => ['═', '║', '╔', '╗', '╚', '╝'],
            LineStyle::Rounded => ['─', '│', '╭', '╮', '╰', '╯'],
            LineStyle::Heavy => ['━', '┃', '┏', '┓', '┗', '┛'],
        }
    }
}

/// One-cell frame on every side.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBorder {
    style: LineStyle,
}

impl LineBorder {
    pub fn new(style: LineStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }
}

impl BorderRenderer for LineBorder {
    fn wrapped_offset(&self) -> Position {
        Position::new(1, 1)
    }

    fn insets(&self) -> Size {
        Size::new(2, 2)
    }

    fn draw(&self, graphics: &mut TextGraphics<'_>, title: &str, definition: &ThemeDefinition) {
        let size = graphics.size();
        if size.is_empty() {
            return;
        }
        let [h, v, tl, tr, bl, br] = self.style.glyphs();
        let h = definition.character(border_chars::HORIZONTAL, h);
        let v = definition.character(border_chars::VERTICAL, v);
        let tl = definition.character(border_chars::TOP_LEFT, tl);
        let tr = definition.character(border_chars::TOP_RIGHT, tr);
        let bl = definition.character(border_chars::BOTTOM_LEFT, bl);
        let br = definition.character(border_chars::BOTTOM_RIGHT, br);

        graphics.apply_style(&definition.normal);
        let right = size.columns as i32 - 1;
        let bottom = size.rows as i32 - 1;

        graphics.draw_horizontal_line(0, 0, size.columns, h);
        graphics.draw_horizontal_line(0, bottom, size.columns, h);
        graphics.draw_vertical_line(0, 0, size.rows, v);
        graphics.draw_vertical_line(right, 0, size.rows, v);

        graphics.set_character(0, 0, tl);
        graphics.set_character(right, 0, tr);
        graphics.set_character(0, bottom, bl);
        graphics.set_character(right, bottom, br);

        // Title sits on the top edge between the corners.
        if !title.is_empty() && size.columns > 4 {
            let room = (size.columns - 4) as usize;
            let shown: String = title.chars().take(room).collect();
            graphics.put_string(2, 0, &shown);
        }
    }
}

// =============================================================================
// SPACER BORDER
// =============================================================================

/// Invisible padding around the child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpacerBorder {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

impl SpacerBorder {
    pub fn new(top: u16, left: u16, bottom: u16, right: u16) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same padding on every side.
    pub fn uniform(padding: u16) -> Self {
        Self::new(padding, padding, padding, padding)
    }
}

impl BorderRenderer for SpacerBorder {
    fn wrapped_offset(&self) -> Position {
        Position::new(self.left as i32, self.top as i32)
    }

    fn insets(&self) -> Size {
        Size::new(
            self.left.saturating_add(self.right),
            self.top.saturating_add(self.bottom),
        )
    }

    fn draw(&self, _graphics: &mut TextGraphics<'_>, _title: &str, _definition: &ThemeDefinition) {}
}

// =============================================================================
// TESTS
// =============================================================================
