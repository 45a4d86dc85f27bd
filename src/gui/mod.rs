//! GUI - the event loop that drives input dispatch and redraws.
//!
//! Two deployment models share one lifecycle and one iteration body:
//!
//! - [`SameTextGuiThread`]: cooperative. The embedder calls
//!   [`process_events_and_update`](SameTextGuiThread::process_events_and_update)
//!   on its own thread; errors propagate to the caller unless an
//!   [`ExceptionHandler`] is installed.
//! - [`SeparateTextGuiThread`]: dedicated. A named background thread owns the
//!   [`TextGui`]; other contexts use an [`ActionSender`]. Errors go through
//!   an exception handler, [`LogAndContinue`] by default.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──start──► Started ──stop──► Stopping ──iteration ends──► Stopped
//! ```
//!
//! Transitions never go backwards. `wait_for_stop` blocks until `Stopped`.
//!
//! # One iteration
//!
//! ```text
//! run queued actions → drain input into the pane → redraw if pending
//! ```

mod action;
mod event_loop;
mod exception;
mod lifecycle;
mod same_thread;
mod separate_thread;
mod text_gui;

pub use action::{Action, ActionSender};
pub use exception::{ErrorPolicy, ExceptionHandler, LogAndContinue, RethrowAll};
pub use lifecycle::WaitInterrupter;
pub use same_thread::SameTextGuiThread;
pub use separate_thread::{GuiThreadConfig, SeparateTextGuiThread};
pub use text_gui::{TextGui, TextGuiListener};

use std::thread::ThreadId;
use std::time::Duration;

use crate::error::Result;

/// Where a GUI thread is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiThreadState {
    Created,
    Started,
    Stopping,
    Stopped,
}

/// Operations shared by both deployment models.
pub trait TextGuiThread {
    /// `Created → Started`. Fails from any other state.
    fn start(&mut self) -> Result<()>;

    /// Handle for queueing actions and controlling the lifecycle.
    fn action_sender(&self) -> ActionSender;

    /// `Started → Stopping`; the loop ends after its current iteration.
    fn stop(&self) -> Result<()> {
        self.action_sender().stop()
    }

    fn state(&self) -> GuiThreadState {
        self.action_sender().state()
    }

    fn thread_id(&self) -> Option<ThreadId> {
        self.action_sender().thread_id()
    }

    fn wait_for_stop(&self) -> Result<()> {
        self.action_sender().wait_for_stop()
    }

    fn wait_for_stop_timeout(&self, timeout: Duration) -> Result<()> {
        self.action_sender().wait_for_stop_timeout(timeout)
    }

    fn wait_interrupter(&self) -> WaitInterrupter {
        self.action_sender().wait_interrupter()
    }
}
