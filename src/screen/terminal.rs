//! TerminalScreen - crossterm-backed [`Screen`].
//!
//! `start()` switches to raw mode on the alternate screen; `stop()` (or
//! dropping the screen) restores the terminal. Cells are staged by
//! `set_cell` and written in one queued batch on `refresh`.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::debug;

use crate::state::input::{convert_event, InputEvent};
use crate::state::keyboard::KeyStroke;
use crate::types::{Attr, Cell, Position, Rgba, Size};

use super::Screen;

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_crossterm_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn attributes(attrs: Attr) -> impl Iterator<Item = Attribute> {
    [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::REVERSE, Attribute::Reverse),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ]
    .into_iter()
    .filter(move |(flag, _)| attrs.contains(*flag))
    .map(|(_, attribute)| attribute)
}

// =============================================================================
// SCREEN
// =============================================================================

pub struct TerminalScreen {
    out: Stdout,
    size: Size,
    pending_resize: Option<Size>,
    staged: Vec<(u16, u16, Cell)>,
    cursor: Option<Position>,
    active: bool,
}

impl TerminalScreen {
    /// Query the terminal size. Does not touch terminal modes yet.
    pub fn new() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self {
            out: io::stdout(),
            size: Size::new(columns, rows),
            pending_resize: None,
            staged: Vec::new(),
            cursor: None,
            active: false,
        })
    }

    /// Enter raw mode and the alternate screen.
    pub fn start(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide)?;
        self.active = true;
        debug!(size = %self.size, "terminal screen started");
        Ok(())
    }

    /// Restore the terminal.
    pub fn stop(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        debug!("terminal screen stopped");
        Ok(())
    }

    /// Turn a crossterm event into a key stroke, recording resizes.
    fn accept(&mut self, event: InputEvent) -> Option<KeyStroke> {
        match event {
            InputEvent::Key(key) => Some(key),
            InputEvent::Resize(columns, rows) => {
                self.pending_resize = Some(Size::new(columns, rows));
                None
            }
            InputEvent::None => None,
        }
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

impl Screen for TerminalScreen {
    fn terminal_size(&self) -> Size {
        self.size
    }

    fn do_resize_if_necessary(&mut self) -> Option<Size> {
        let size = self.pending_resize.take()?;
        self.size = size;
        self.staged.clear();
        Some(size)
    }

    fn set_cell(&mut self, column: u16, row: u16, cell: Cell) {
        self.staged.push((column, row, cell));
    }

    fn set_cursor_position(&mut self, position: Option<Position>) {
        self.cursor = position;
    }

    fn refresh(&mut self) -> io::Result<()> {
        for (column, row, cell) in self.staged.drain(..) {
            queue!(
                self.out,
                MoveTo(column, row),
                SetAttribute(Attribute::Reset),
                SetForegroundColor(to_crossterm_color(cell.fg)),
                SetBackgroundColor(to_crossterm_color(cell.bg))
            )?;
            for attribute in attributes(cell.attrs) {
                queue!(self.out, SetAttribute(attribute))?;
            }
            queue!(self.out, Print(cell.char))?;
        }
        match self.cursor {
            Some(position) if self.size.contains(position) => {
                queue!(self.out, MoveTo(position.column as u16, position.row as u16), Show)?
            }
            _ => queue!(self.out, Hide)?,
        }
        self.out.flush()
    }

    fn poll_input(&mut self) -> io::Result<Option<KeyStroke>> {
        while event::poll(Duration::ZERO)? {
            let converted = convert_event(event::read()?);
            if let Some(key) = self.accept(converted) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    fn read_input(&mut self) -> io::Result<KeyStroke> {
        loop {
            let converted = convert_event(event::read()?);
            if let Some(key) = self.accept(converted) {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_crossterm_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_crossterm_color(Rgba::ansi(3)), Color::AnsiValue(3));
        assert_eq!(
            to_crossterm_color(Rgba::rgb(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn test_attribute_mapping() {
        let mapped: Vec<_> = attributes(Attr::BOLD | Attr::UNDERLINE).collect();
        assert_eq!(mapped, vec![Attribute::Bold, Attribute::Underlined]);
        assert_eq!(attributes(Attr::NONE).count(), 0);
    }
}
