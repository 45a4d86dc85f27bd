//! FrameBuffer - the cell grid a frame is drawn into.
//!
//! Flat `Vec<Cell>` storage with row-major indexing (`index = y * width + x`).
//! Drawing goes through [`TextGraphics`](super::TextGraphics); the buffer
//! itself only knows cells and bounds.

use crate::types::{Cell, ClipRect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn with_size(size: Size) -> Self {
        Self::new(size.columns, size.rows)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Cell at (x, y), `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Write one cell if it lies inside the buffer and `clip`.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(&mut self, x: u16, y: u16, cell: Cell, clip: Option<&ClipRect>) -> bool {
        if clip.is_some_and(|clip| !clip.contains(x, y)) {
            return false;
        }
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            (x, y, cell)
        })
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, Cell::default());
        self.clear();
    }

    /// Text of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.char))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cell_respects_clip() {
        let mut buffer = FrameBuffer::new(4, 2);
        let clip = ClipRect::new(1, 0, 2, 1);
        assert!(!buffer.set_cell(0, 0, Cell::plain('x'), Some(&clip)));
        assert!(buffer.set_cell(1, 0, Cell::plain('y'), Some(&clip)));
        assert!(!buffer.set_cell(9, 9, Cell::plain('z'), None));
        assert_eq!(buffer.row_text(0), " y  ");
    }

    #[test]
    fn test_resize_clears() {
        let mut buffer = FrameBuffer::new(2, 2);
        buffer.set_cell(0, 0, Cell::plain('x'), None);
        buffer.resize(3, 1);
        assert_eq!(buffer.size(), Size::new(3, 1));
        assert_eq!(buffer.row_text(0), "   ");
    }

    #[test]
    fn test_iter_coordinates() {
        let buffer = FrameBuffer::new(3, 2);
        let last = buffer.iter().last().map(|(x, y, _)| (x, y));
        assert_eq!(last, Some((2, 1)));
    }
}
