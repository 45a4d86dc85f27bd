//! Screen - the surface the core writes to and reads keys from.
//!
//! The core never emits escape sequences itself. It writes cells, places
//! the cursor, asks for a refresh and polls for key strokes; a backend turns
//! that into terminal I/O.
//!
//! - [`TerminalScreen`]: crossterm-backed terminal
//! - [`VirtualScreen`]: in-memory screen for tests and headless use

mod terminal;
mod virtual_screen;

pub use terminal::TerminalScreen;
pub use virtual_screen::VirtualScreen;

use std::io;

use crate::state::keyboard::KeyStroke;
use crate::types::{Cell, Position, Size};

pub trait Screen: Send {
    /// Current size in cells.
    fn terminal_size(&self) -> Size;

    /// Pick up a pending size change. Returns the new size if there was one.
    fn do_resize_if_necessary(&mut self) -> Option<Size>;

    /// Stage one cell for the next refresh.
    fn set_cell(&mut self, column: u16, row: u16, cell: Cell);

    /// Where the visible cursor goes on the next refresh; `None` hides it.
    fn set_cursor_position(&mut self, position: Option<Position>);

    /// Make staged changes visible.
    fn refresh(&mut self) -> io::Result<()>;

    /// Next key stroke if one is already available. Never blocks.
    fn poll_input(&mut self) -> io::Result<Option<KeyStroke>>;

    /// Next key stroke, blocking until one arrives.
    fn read_input(&mut self) -> io::Result<KeyStroke>;
}
