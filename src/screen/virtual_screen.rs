//! VirtualScreen - an in-memory [`Screen`].
//!
//! Clones share one state, so a test can move one handle into the GUI (even
//! onto a dedicated GUI thread) and keep another to push key strokes and
//! inspect what was drawn.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::state::keyboard::{Key, KeyStroke};
use crate::types::{Cell, Position, Size};

use super::Screen;
use crate::renderer::FrameBuffer;

struct VirtualState {
    size: Size,
    pending_resize: Option<Size>,
    /// Cells staged since the last refresh.
    back: FrameBuffer,
    /// Cells visible after the last refresh.
    front: FrameBuffer,
    cursor: Option<Position>,
    visible_cursor: Option<Position>,
    input: VecDeque<KeyStroke>,
    closed: bool,
    refreshes: usize,
    cells_written: usize,
}

#[derive(Clone)]
pub struct VirtualScreen {
    state: Arc<Mutex<VirtualState>>,
    input_ready: Arc<Condvar>,
}

impl VirtualScreen {
    pub fn new(size: Size) -> Self {
        let state = VirtualState {
            size,
            pending_resize: None,
            back: FrameBuffer::with_size(size),
            front: FrameBuffer::with_size(size),
            cursor: None,
            visible_cursor: None,
            input: VecDeque::new(),
            closed: false,
            refreshes: 0,
            cells_written: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            input_ready: Arc::new(Condvar::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VirtualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // TEST SIDE
    // =========================================================================

    /// Queue a key stroke for the GUI to read.
    pub fn push_input(&self, key: impl Into<KeyStroke>) {
        self.lock().input.push_back(key.into());
        self.input_ready.notify_all();
    }

    /// After the queue drains, report `Key::Eof` forever.
    pub fn close_input(&self) {
        self.lock().closed = true;
        self.input_ready.notify_all();
    }

    /// Simulate a terminal resize; the GUI sees it on its next resize check.
    pub fn resize(&self, size: Size) {
        self.lock().pending_resize = Some(size);
    }

    /// Visible cell at (column, row).
    pub fn cell(&self, column: u16, row: u16) -> Option<Cell> {
        self.lock().front.get(column, row).copied()
    }

    /// Visible text of one row.
    pub fn row_text(&self, row: u16) -> String {
        self.lock().front.row_text(row)
    }

    /// Cursor position after the last refresh.
    pub fn cursor(&self) -> Option<Position> {
        self.lock().visible_cursor
    }

    pub fn refresh_count(&self) -> usize {
        self.lock().refreshes
    }

    /// Total `set_cell` calls received.
    pub fn cells_written(&self) -> usize {
        self.lock().cells_written
    }

    pub fn pending_input(&self) -> usize {
        self.lock().input.len()
    }
}

impl Screen for VirtualScreen {
    fn terminal_size(&self) -> Size {
        self.lock().size
    }

    fn do_resize_if_necessary(&mut self) -> Option<Size> {
        let mut state = self.lock();
        let size = state.pending_resize.take()?;
        state.size = size;
        state.back.resize(size.columns, size.rows);
        state.front.resize(size.columns, size.rows);
        Some(size)
    }

    fn set_cell(&mut self, column: u16, row: u16, cell: Cell) {
        let mut state = self.lock();
        state.cells_written += 1;
        state.back.set_cell(column, row, cell, None);
    }

    fn set_cursor_position(&mut self, position: Option<Position>) {
        self.lock().cursor = position;
    }

    fn refresh(&mut self) -> io::Result<()> {
        let mut state = self.lock();
        let state = &mut *state;
        state.front.clone_from(&state.back);
        state.visible_cursor = state.cursor;
        state.refreshes += 1;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<KeyStroke>> {
        let mut state = self.lock();
        match state.input.pop_front() {
            Some(key) => Ok(Some(key)),
            None if state.closed => Ok(Some(KeyStroke::new(Key::Eof))),
            None => Ok(None),
        }
    }

    fn read_input(&mut self) -> io::Result<KeyStroke> {
        let mut state = self.lock();
        loop {
            if let Some(key) = state.input.pop_front() {
                return Ok(key);
            }
            if state.closed {
                return Ok(KeyStroke::new(Key::Eof));
            }
            state = self
                .input_ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cells_visible_after_refresh() {
        let mut screen = VirtualScreen::new(Size::new(3, 1));
        let observer = screen.clone();
        screen.set_cell(1, 0, Cell::plain('x'));
        assert_eq!(observer.row_text(0), "   ");
        screen.refresh().unwrap();
        assert_eq!(observer.row_text(0), " x ");
        assert_eq!(observer.refresh_count(), 1);
    }

    #[test]
    fn test_poll_input_is_fifo() {
        let mut screen = VirtualScreen::new(Size::new(1, 1));
        screen.push_input(Key::Tab);
        screen.push_input(KeyStroke::char('a'));
        assert_eq!(screen.poll_input().unwrap().map(|k| k.key), Some(Key::Tab));
        assert_eq!(screen.poll_input().unwrap().map(|k| k.key), Some(Key::Char('a')));
        assert_eq!(screen.poll_input().unwrap(), None);
    }

    #[test]
    fn test_read_input_blocks_until_push() {
        let mut screen = VirtualScreen::new(Size::new(1, 1));
        let feeder = screen.clone();
        let handle = thread::spawn(move || feeder.push_input(Key::Enter));
        let key = screen.read_input().unwrap();
        handle.join().unwrap();
        assert_eq!(key.key, Key::Enter);
    }

    #[test]
    fn test_closed_input_reports_eof() {
        let mut screen = VirtualScreen::new(Size::new(1, 1));
        screen.close_input();
        assert_eq!(screen.poll_input().unwrap().map(|k| k.key), Some(Key::Eof));
    }

    #[test]
    fn test_resize_is_picked_up_once() {
        let mut screen = VirtualScreen::new(Size::new(2, 2));
        screen.resize(Size::new(5, 1));
        assert_eq!(screen.do_resize_if_necessary(), Some(Size::new(5, 1)));
        assert_eq!(screen.do_resize_if_necessary(), None);
        assert_eq!(screen.terminal_size(), Size::new(5, 1));
    }
}
