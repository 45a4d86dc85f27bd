//! TextGui - a screen, one base pane and the redraw bookkeeping between them.

use tracing::{debug, trace};

use crate::error::Result;
use crate::pane::BasePane;
use crate::renderer::{DiffRenderer, FrameBuffer, TextGraphics};
use crate::screen::Screen;
use crate::state::keyboard::{Key, KeyStroke};
use crate::theme::Theme;

/// Sees key strokes the pane did not consume.
pub trait TextGuiListener: Send {
    /// Return true to mark `key` handled.
    fn on_unhandled_key_stroke(&mut self, gui: &TextGui, key: &KeyStroke) -> bool;
}

impl<F> TextGuiListener for F
where
    F: FnMut(&KeyStroke) -> bool + Send,
{
    fn on_unhandled_key_stroke(&mut self, _gui: &TextGui, key: &KeyStroke) -> bool {
        self(key)
    }
}

pub struct TextGui {
    screen: Box<dyn Screen>,
    pane: BasePane,
    theme: Theme,
    listeners: Vec<Box<dyn TextGuiListener>>,
    frame: FrameBuffer,
    renderer: DiffRenderer,
    /// Set after a resize until the next full redraw.
    full_redraw: bool,
    input_closed: bool,
}

impl TextGui {
    /// A GUI drawing an empty pane that covers the whole screen.
    pub fn new(screen: impl Screen + 'static) -> Self {
        let size = screen.terminal_size();
        let mut pane = BasePane::new();
        pane.set_size(size);
        Self {
            screen: Box::new(screen),
            pane,
            theme: Theme::default(),
            listeners: Vec::new(),
            frame: FrameBuffer::with_size(size),
            renderer: DiffRenderer::new(),
            full_redraw: true,
            input_closed: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.set_theme(theme);
        self
    }

    pub fn pane(&self) -> &BasePane {
        &self.pane
    }

    pub fn pane_mut(&mut self) -> &mut BasePane {
        &mut self.pane
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme and schedule a redraw.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.pane.invalidate();
    }

    pub fn add_listener(&mut self, listener: impl TextGuiListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// True once the screen reported end of input.
    pub fn is_input_closed(&self) -> bool {
        self.input_closed
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Drain available key strokes into the pane. Never blocks.
    ///
    /// Returns true if at least one key stroke was processed.
    pub fn process_input(&mut self) -> Result<bool> {
        let mut processed = false;
        while !self.input_closed {
            let Some(key) = self.screen.poll_input()? else {
                break;
            };
            if key.key == Key::Eof {
                debug!("screen input closed");
                self.input_closed = true;
                break;
            }
            processed = true;
            self.handle_input(&key);
        }
        Ok(processed)
    }

    /// Route one key stroke: pane first, then GUI listeners.
    pub fn handle_input(&mut self, key: &KeyStroke) -> bool {
        if self.pane.handle_input(key) {
            return true;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        let mut handled = false;
        for listener in listeners.iter_mut() {
            handled |= listener.on_unhandled_key_stroke(self, key);
        }
        self.listeners = listeners;
        if !handled {
            trace!(?key, "unhandled key stroke");
        }
        handled
    }

    // =========================================================================
    // REDRAW
    // =========================================================================

    fn check_resize(&mut self) {
        if let Some(size) = self.screen.do_resize_if_necessary() {
            debug!(%size, "screen resized");
            self.frame.resize(size.columns, size.rows);
            self.renderer.invalidate();
            self.pane.set_size(size);
            self.full_redraw = true;
        }
    }

    /// True if the screen was resized or anything in the pane is invalid.
    pub fn is_pending_update(&mut self) -> bool {
        self.check_resize();
        self.full_redraw || self.pane.is_invalid()
    }

    /// Redraw the pane and push the changed cells to the screen.
    pub fn update_screen(&mut self) -> Result<()> {
        self.check_resize();
        self.frame.clear();
        {
            let mut graphics = TextGraphics::new(&mut self.frame);
            graphics
                .apply_style(&self.theme.base_definition().normal)
                .fill(' ');
            self.pane.draw(&mut graphics, &self.theme);
        }
        let written = self.renderer.render(&self.frame, self.screen.as_mut());
        self.screen.set_cursor_position(self.pane.cursor_position());
        if let Err(err) = self.screen.refresh() {
            // The screen may hold anything now; diff against nothing next time.
            self.renderer.invalidate();
            return Err(err.into());
        }
        self.full_redraw = false;
        trace!(written, "screen updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EmptySpace;
    use crate::screen::VirtualScreen;
    use crate::types::Size;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_first_update_draws_everything() {
        let screen = VirtualScreen::new(Size::new(8, 3));
        let mut gui = TextGui::new(screen.clone());
        assert!(gui.is_pending_update());
        gui.update_screen().unwrap();
        assert!(!gui.is_pending_update());
        assert_eq!(screen.refresh_count(), 1);
        assert_eq!(screen.cells_written(), 24);
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let screen = VirtualScreen::new(Size::new(4, 2));
        let mut gui = TextGui::new(screen.clone());
        gui.update_screen().unwrap();

        screen.resize(Size::new(6, 2));
        assert!(gui.is_pending_update());
        assert_eq!(gui.pane().size(), Size::new(6, 2));
        gui.update_screen().unwrap();
        assert_eq!(screen.cells_written(), 8 + 12);
    }

    #[test]
    fn test_unhandled_keys_reach_listeners() {
        let screen = VirtualScreen::new(Size::new(4, 2));
        let mut gui = TextGui::new(screen.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        gui.add_listener(move |key: &KeyStroke| {
            sink.lock().unwrap().push(key.key);
            true
        });

        screen.push_input(KeyStroke::char('x'));
        assert!(gui.process_input().unwrap());
        assert_eq!(*seen.lock().unwrap(), vec![Key::Char('x')]);
    }

    #[test]
    fn test_eof_closes_input() {
        let screen = VirtualScreen::new(Size::new(4, 2));
        let mut gui = TextGui::new(screen.clone());
        screen.close_input();
        assert!(!gui.process_input().unwrap());
        assert!(gui.is_input_closed());
    }

    #[test]
    fn test_tab_focuses_first_interactable() {
        let screen = VirtualScreen::new(Size::new(10, 4));
        let mut gui = TextGui::new(screen.clone());
        let root = gui.pane().component();
        let button = gui
            .pane_mut()
            .tree_mut()
            .create_interactable(EmptySpace::new(Size::new(3, 1)));
        gui.pane_mut().add_component(root, button).unwrap();

        screen.push_input(Key::Tab);
        gui.process_input().unwrap();
        assert_eq!(gui.pane().focused_interactable(), Some(button));
    }
}
