//! Action queue - how other contexts reach the GUI.
//!
//! The [`TextGui`] is owned by whichever context runs the loop. Everything
//! else holds an [`ActionSender`] and submits closures that run on that
//! context between iterations.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::ThreadId;
use std::time::Duration;

use crate::error::{GuiError, Result};

use super::lifecycle::{Lifecycle, WaitInterrupter};
use super::{GuiThreadState, TextGui};

/// How often a blocked `invoke_and_wait` re-checks that the loop is alive.
const REPLY_POLL: Duration = Duration::from_millis(20);

/// A unit of work run on the GUI context.
pub type Action = Box<dyn FnOnce(&mut TextGui) + Send>;

pub(crate) enum GuiMessage {
    Run(Action),
    /// Nothing to run; just re-check the lifecycle.
    Wake,
}

/// Clonable handle for submitting actions and controlling the lifecycle.
#[derive(Clone)]
pub struct ActionSender {
    tx: Sender<GuiMessage>,
    lifecycle: Arc<Lifecycle>,
}

impl ActionSender {
    pub(crate) fn new(tx: Sender<GuiMessage>, lifecycle: Arc<Lifecycle>) -> Self {
        Self { tx, lifecycle }
    }

    /// Queue `action` and return immediately.
    ///
    /// Actions queued before `start` run once the loop is running.
    pub fn invoke_later(&self, action: impl FnOnce(&mut TextGui) + Send + 'static) -> Result<()> {
        let state = self.lifecycle.state();
        if matches!(state, GuiThreadState::Stopping | GuiThreadState::Stopped) {
            return Err(GuiError::InvalidStateTransition {
                operation: "invoke an action",
                state,
            });
        }
        self.tx
            .send(GuiMessage::Run(Box::new(action)))
            .map_err(|_| GuiError::ThreadTerminated)
    }

    /// Queue `action` and block until it has run, returning its result.
    ///
    /// Calling this from the GUI context itself would wait forever and is
    /// rejected. If the loop stops before the action runs, the call fails
    /// with [`GuiError::ThreadTerminated`].
    pub fn invoke_and_wait<R>(&self, action: impl FnOnce(&mut TextGui) -> R + Send + 'static) -> Result<R>
    where
        R: Send + 'static,
    {
        if self.lifecycle.is_current_thread() {
            return Err(GuiError::InvalidStateTransition {
                operation: "invoke and wait from the GUI thread",
                state: self.lifecycle.state(),
            });
        }
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.invoke_later(move |gui| {
            let _ = reply_tx.send(action(gui));
        })?;
        loop {
            match reply_rx.recv_timeout(REPLY_POLL) {
                Ok(value) => return Ok(value),
                Err(RecvTimeoutError::Disconnected) => return Err(GuiError::ThreadTerminated),
                Err(RecvTimeoutError::Timeout) => {
                    // Nothing runs after `Stopped`; one last look for a reply
                    // sent just before the transition.
                    if self.lifecycle.state() == GuiThreadState::Stopped {
                        return reply_rx.try_recv().map_err(|_| GuiError::ThreadTerminated);
                    }
                }
            }
        }
    }

    /// Ask the loop to stop after its current iteration.
    pub fn stop(&self) -> Result<()> {
        self.lifecycle.request_stop()?;
        let _ = self.tx.send(GuiMessage::Wake);
        Ok(())
    }

    pub fn state(&self) -> GuiThreadState {
        self.lifecycle.state()
    }

    /// Thread running the loop, once known.
    pub fn thread_id(&self) -> Option<ThreadId> {
        self.lifecycle.thread_id()
    }

    /// True if called from the thread running the loop.
    pub fn is_gui_thread(&self) -> bool {
        self.lifecycle.is_current_thread()
    }

    /// Block until the loop has stopped.
    pub fn wait_for_stop(&self) -> Result<()> {
        self.lifecycle.wait_for_stop(None)
    }

    /// Block until the loop has stopped or `timeout` expires.
    pub fn wait_for_stop_timeout(&self, timeout: Duration) -> Result<()> {
        self.lifecycle.wait_for_stop(Some(timeout))
    }

    pub fn wait_interrupter(&self) -> WaitInterrupter {
        WaitInterrupter {
            lifecycle: self.lifecycle.clone(),
        }
    }
}
