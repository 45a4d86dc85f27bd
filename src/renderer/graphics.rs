//! TextGraphics - a clipped, translated view onto a [`FrameBuffer`].
//!
//! Coordinates passed to a `TextGraphics` are relative to its own top-left
//! corner. Anything outside its area (and outside every enclosing area it
//! was carved from) is silently dropped.

use crate::theme::ThemeStyle;
use crate::types::{Attr, Cell, ClipRect, Position, Rgba, Size};

use super::buffer::FrameBuffer;

pub struct TextGraphics<'a> {
    buffer: &'a mut FrameBuffer,
    /// Buffer coordinates of this area's (0, 0).
    origin: Position,
    size: Size,
    /// `None` when nothing of this area is visible.
    clip: Option<ClipRect>,
    fg: Rgba,
    bg: Rgba,
    attrs: Attr,
}

impl<'a> TextGraphics<'a> {
    /// Graphics covering the whole buffer.
    pub fn new(buffer: &'a mut FrameBuffer) -> Self {
        let size = buffer.size();
        let clip = Some(buffer.bounds());
        Self {
            buffer,
            origin: Position::ORIGIN,
            size,
            clip,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// A nested area at `offset` (relative to this one) of `size`, clipped
    /// to this area. Inherits the current colors.
    pub fn sub_graphics(&mut self, offset: Position, size: Size) -> TextGraphics<'_> {
        let origin = self.origin + offset;
        let clip = ClipRect::from_signed(origin, size)
            .zip(self.clip)
            .and_then(|(own, parent)| own.intersect(&parent));
        TextGraphics {
            buffer: &mut *self.buffer,
            origin,
            size,
            clip,
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        }
    }

    // =========================================================================
    // STYLE
    // =========================================================================

    pub fn set_foreground(&mut self, fg: Rgba) -> &mut Self {
        self.fg = fg;
        self
    }

    pub fn set_background(&mut self, bg: Rgba) -> &mut Self {
        self.bg = bg;
        self
    }

    pub fn set_attrs(&mut self, attrs: Attr) -> &mut Self {
        self.attrs = attrs;
        self
    }

    pub fn apply_style(&mut self, style: &ThemeStyle) -> &mut Self {
        self.fg = style.fg.resolve();
        self.bg = style.bg.resolve();
        self.attrs = style.attrs;
        self
    }

    // =========================================================================
    // DRAWING
    // =========================================================================

    /// Put `ch` at (column, row) with the current style.
    pub fn set_character(&mut self, column: i32, row: i32, ch: char) {
        let Some(clip) = self.clip else {
            return;
        };
        let x = self.origin.column + column;
        let y = self.origin.row + row;
        if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
            return;
        }
        let cell = Cell {
            char: ch,
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        };
        self.buffer.set_cell(x as u16, y as u16, cell, Some(&clip));
    }

    /// Write `text` left to right starting at (column, row). No wrapping.
    pub fn put_string(&mut self, column: i32, row: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.set_character(column + i as i32, row, ch);
        }
    }

    pub fn draw_horizontal_line(&mut self, column: i32, row: i32, length: u16, ch: char) {
        for i in 0..length as i32 {
            self.set_character(column + i, row, ch);
        }
    }

    pub fn draw_vertical_line(&mut self, column: i32, row: i32, length: u16, ch: char) {
        for i in 0..length as i32 {
            self.set_character(column, row + i, ch);
        }
    }

    pub fn fill_rectangle(&mut self, top_left: Position, size: Size, ch: char) {
        for row in 0..size.rows as i32 {
            self.draw_horizontal_line(top_left.column, top_left.row + row, size.columns, ch);
        }
    }

    /// Fill the whole area with `ch` in the current style.
    pub fn fill(&mut self, ch: char) {
        self.fill_rectangle(Position::ORIGIN, self.size, ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_graphics_translates_and_clips() {
        let mut buffer = FrameBuffer::new(10, 3);
        {
            let mut root = TextGraphics::new(&mut buffer);
            let mut sub = root.sub_graphics(Position::new(2, 1), Size::new(3, 1));
            sub.put_string(0, 0, "abcdef");
            sub.set_character(0, 1, 'z');
        }
        assert_eq!(buffer.row_text(1), "  abc     ");
        assert_eq!(buffer.row_text(2), "          ");
    }

    #[test]
    fn test_nested_clip_intersects() {
        let mut buffer = FrameBuffer::new(10, 1);
        {
            let mut root = TextGraphics::new(&mut buffer);
            let mut outer = root.sub_graphics(Position::new(1, 0), Size::new(3, 1));
            let mut inner = outer.sub_graphics(Position::new(2, 0), Size::new(5, 1));
            inner.fill('#');
        }
        assert_eq!(buffer.row_text(0), "   #      ");
    }

    #[test]
    fn test_negative_offsets_are_clipped() {
        let mut buffer = FrameBuffer::new(4, 1);
        {
            let mut root = TextGraphics::new(&mut buffer);
            let mut sub = root.sub_graphics(Position::new(-2, 0), Size::new(4, 1));
            sub.put_string(0, 0, "wxyz");
        }
        assert_eq!(buffer.row_text(0), "yz  ");
    }

    #[test]
    fn test_style_applies_to_cells() {
        let mut buffer = FrameBuffer::new(1, 1);
        {
            let mut graphics = TextGraphics::new(&mut buffer);
            graphics
                .set_foreground(Rgba::RED)
                .set_attrs(Attr::BOLD)
                .set_character(0, 0, 'x');
        }
        let cell = buffer.get(0, 0).copied().unwrap();
        assert_eq!(cell.fg, Rgba::RED);
        assert!(cell.attrs.contains(Attr::BOLD));
    }
}
