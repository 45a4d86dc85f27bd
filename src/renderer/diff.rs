//! Differential renderer.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! hands cells that changed to the [`Screen`]. This bounds redraw work by
//! what actually changed rather than by screen size.
//!
//! # Algorithm
//!
//! 1. For each cell in the new frame:
//!    - If a previous frame of the same size exists and the cell is unchanged: skip
//!    - Otherwise: `screen.set_cell`
//! 2. Store the current frame as previous for the next comparison
//!
//! The caller refreshes the screen afterwards.

use crate::screen::Screen;

use super::buffer::FrameBuffer;

#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push changed cells of `buffer` to `screen`.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer, screen: &mut dyn Screen) -> usize {
        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.size() == buffer.size());

        let mut written = 0;
        for (x, y, cell) in buffer.iter() {
            let unchanged = previous
                .and_then(|prev| prev.get(x, y))
                .is_some_and(|prev_cell| prev_cell == cell);
            if !unchanged {
                screen.set_cell(x, y, *cell);
                written += 1;
            }
        }

        match self.previous.as_mut() {
            Some(prev) if prev.size() == buffer.size() => prev.clone_from(buffer),
            _ => self.previous = Some(buffer.clone()),
        }
        written
    }

    /// Forget the previous frame; the next render writes every cell.
    ///
    /// Use this after a screen resize or when the screen is corrupted.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::VirtualScreen;
    use crate::types::{Cell, Size};

    #[test]
    fn test_first_render_writes_everything() {
        let mut screen = VirtualScreen::new(Size::new(3, 2));
        let mut renderer = DiffRenderer::new();
        let buffer = FrameBuffer::new(3, 2);
        assert_eq!(renderer.render(&buffer, &mut screen), 6);
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_only_changes_are_written() {
        let mut screen = VirtualScreen::new(Size::new(3, 2));
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(3, 2);
        renderer.render(&buffer, &mut screen);

        buffer.set_cell(1, 1, Cell::plain('x'), None);
        assert_eq!(renderer.render(&buffer, &mut screen), 1);
        assert_eq!(renderer.render(&buffer, &mut screen), 0);
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut screen = VirtualScreen::new(Size::new(2, 2));
        let mut renderer = DiffRenderer::new();
        let buffer = FrameBuffer::new(2, 2);
        renderer.render(&buffer, &mut screen);
        renderer.invalidate();
        assert_eq!(renderer.render(&buffer, &mut screen), 4);
    }
}
