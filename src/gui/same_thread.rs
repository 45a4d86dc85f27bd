//! Cooperative GUI thread: the embedder drives the loop.
//!
//! ```no_run
//! use spark_gui::gui::{SameTextGuiThread, TextGui, TextGuiThread};
//! use spark_gui::screen::TerminalScreen;
//!
//! # fn main() -> spark_gui::Result<()> {
//! let mut screen = TerminalScreen::new()?;
//! screen.start()?;
//! let mut thread = SameTextGuiThread::new(TextGui::new(screen));
//! thread.start()?;
//! while thread.state() == spark_gui::gui::GuiThreadState::Started {
//!     if !thread.process_events_and_update()? {
//!         std::thread::sleep(std::time::Duration::from_millis(10));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::error::{GuiError, Result};

use super::action::{ActionSender, GuiMessage};
use super::event_loop::run_iteration;
use super::exception::ExceptionHandler;
use super::lifecycle::Lifecycle;
use super::{GuiThreadState, TextGui, TextGuiThread};

pub struct SameTextGuiThread {
    gui: TextGui,
    lifecycle: Arc<Lifecycle>,
    sender: ActionSender,
    receiver: Receiver<GuiMessage>,
    /// `None` propagates every error to the caller.
    exception_handler: Option<Box<dyn ExceptionHandler>>,
}

impl SameTextGuiThread {
    pub fn new(gui: TextGui) -> Self {
        let lifecycle = Lifecycle::new(true);
        let (tx, receiver) = mpsc::channel();
        Self {
            gui,
            sender: ActionSender::new(tx, lifecycle.clone()),
            lifecycle,
            receiver,
            exception_handler: None,
        }
    }

    /// Route input/redraw errors through `handler` instead of returning them.
    pub fn with_exception_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
        self.exception_handler = Some(Box::new(handler));
        self
    }

    pub fn gui(&self) -> &TextGui {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut TextGui {
        &mut self.gui
    }

    pub fn into_gui(self) -> TextGui {
        self.gui
    }

    /// One loop iteration on the calling thread.
    ///
    /// Returns true if anything happened (actions, input or a redraw).
    /// Fails unless the lifecycle is `Started`.
    pub fn process_events_and_update(&mut self) -> Result<bool> {
        if !self.lifecycle.begin_iteration() {
            if self.lifecycle.state() == GuiThreadState::Stopped {
                self.discard_queued();
            }
            return Err(GuiError::InvalidStateTransition {
                operation: "process events",
                state: self.lifecycle.state(),
            });
        }
        let result = run_iteration(
            &mut self.gui,
            &self.receiver,
            &mut self.exception_handler,
            &self.lifecycle,
        );
        self.lifecycle.end_iteration();

        if self.lifecycle.state() == GuiThreadState::Stopped {
            self.discard_queued();
        }
        result
    }

    /// Drop leftover actions so blocked `invoke_and_wait` callers fail.
    fn discard_queued(&self) {
        let discarded = self.receiver.try_iter().count();
        if discarded > 0 {
            debug!(discarded, "discarded actions queued after stop");
        }
    }
}

impl TextGuiThread for SameTextGuiThread {
    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(Some(thread::current().id()))
    }

    fn action_sender(&self) -> ActionSender {
        self.sender.clone()
    }

    /// An idle loop stops at once, so pending actions are dropped here.
    fn stop(&self) -> Result<()> {
        self.sender.stop()?;
        if self.lifecycle.state() == GuiThreadState::Stopped {
            self.discard_queued();
        }
        Ok(())
    }
}
