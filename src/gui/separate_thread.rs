//! Dedicated GUI thread: a named background thread owns the [`TextGui`].
//!
//! The loop runs one iteration, and when it found nothing to do, blocks on
//! the action channel for at most `poll_interval` so queued actions and stop
//! requests are picked up immediately.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{GuiError, Result};

use super::action::{ActionSender, GuiMessage};
use super::event_loop::{run_actions, run_iteration};
use super::exception::{ExceptionHandler, LogAndContinue};
use super::lifecycle::{FinishGuard, Lifecycle};
use super::{GuiThreadState, TextGui, TextGuiThread};

/// Settings of the dedicated thread.
#[derive(Debug, Clone)]
pub struct GuiThreadConfig {
    /// OS thread name.
    pub thread_name: String,
    /// Longest idle wait between input polls.
    pub poll_interval: Duration,
}

impl Default for GuiThreadConfig {
    fn default() -> Self {
        Self {
            thread_name: "spark-gui".to_string(),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Everything the loop takes ownership of on `start`.
struct Parked {
    gui: TextGui,
    receiver: Receiver<GuiMessage>,
    handler: Box<dyn ExceptionHandler>,
}

pub struct SeparateTextGuiThread {
    config: GuiThreadConfig,
    lifecycle: Arc<Lifecycle>,
    sender: ActionSender,
    parked: Option<Parked>,
    handle: Option<JoinHandle<Result<TextGui>>>,
}

impl SeparateTextGuiThread {
    pub fn new(gui: TextGui) -> Self {
        Self::with_config(gui, GuiThreadConfig::default())
    }

    pub fn with_config(gui: TextGui, config: GuiThreadConfig) -> Self {
        let lifecycle = Lifecycle::new(false);
        let (tx, receiver) = mpsc::channel();
        Self {
            config,
            sender: ActionSender::new(tx, lifecycle.clone()),
            lifecycle,
            parked: Some(Parked {
                gui,
                receiver,
                handler: Box::new(LogAndContinue),
            }),
            handle: None,
        }
    }

    /// Replace the default [`LogAndContinue`] handler. Only before `start`.
    pub fn with_exception_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
        if let Some(parked) = self.parked.as_mut() {
            parked.handler = Box::new(handler);
        }
        self
    }

    pub fn config(&self) -> &GuiThreadConfig {
        &self.config
    }

    /// Queue `action` to run on the GUI thread.
    pub fn invoke_later(&self, action: impl FnOnce(&mut TextGui) + Send + 'static) -> Result<()> {
        self.sender.invoke_later(action)
    }

    /// Run `action` on the GUI thread and wait for its result.
    pub fn invoke_and_wait<R>(&self, action: impl FnOnce(&mut TextGui) -> R + Send + 'static) -> Result<R>
    where
        R: Send + 'static,
    {
        self.sender.invoke_and_wait(action)
    }

    /// Stop the loop if it is running, wait for it and take the GUI back.
    ///
    /// Returns the error a rethrowing exception handler ended the loop with,
    /// or [`GuiError::ThreadTerminated`] if the thread panicked.
    pub fn into_gui(mut self) -> Result<TextGui> {
        if let Some(parked) = self.parked.take() {
            return Ok(parked.gui);
        }
        let handle = self.handle.take().ok_or(GuiError::ThreadTerminated)?;
        let _ = self.sender.stop();
        match handle.join() {
            Ok(result) => result,
            Err(_) => Err(GuiError::ThreadTerminated),
        }
    }
}

impl TextGuiThread for SeparateTextGuiThread {
    fn start(&mut self) -> Result<()> {
        self.lifecycle.start(None)?;
        let Some(parked) = self.parked.take() else {
            self.lifecycle.finish();
            return Err(GuiError::ThreadTerminated);
        };

        let lifecycle = self.lifecycle.clone();
        let poll_interval = self.config.poll_interval;
        let spawned = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || run_loop(parked, &lifecycle, poll_interval));

        match spawned {
            Ok(handle) => {
                self.lifecycle.bind_thread(handle.thread().id());
                debug!(name = %self.config.thread_name, "GUI thread spawned");
                self.handle = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.lifecycle.finish();
                Err(err.into())
            }
        }
    }

    fn action_sender(&self) -> ActionSender {
        self.sender.clone()
    }
}

impl Drop for SeparateTextGuiThread {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let _ = self.sender.stop();
        if handle.join().is_err() {
            warn!("GUI thread panicked");
        }
    }
}

fn run_loop(parked: Parked, lifecycle: &Lifecycle, poll_interval: Duration) -> Result<TextGui> {
    let _finish = FinishGuard(lifecycle);
    lifecycle.bind_thread(thread::current().id());
    let Parked {
        mut gui,
        receiver,
        handler,
    } = parked;
    let mut handler = Some(handler);

    while lifecycle.state() == GuiThreadState::Started {
        lifecycle.begin_iteration();
        let outcome = run_iteration(&mut gui, &receiver, &mut handler, lifecycle);
        lifecycle.end_iteration();

        let worked = match outcome {
            Ok(worked) => worked,
            Err(err) => {
                debug!(error = %err, "GUI thread ending on rethrown error");
                return Err(err);
            }
        };
        if worked {
            continue;
        }
        match receiver.recv_timeout(poll_interval) {
            Ok(message) => {
                run_actions(&mut gui, [message]);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => thread::sleep(poll_interval),
        }
    }
    // Dropping the receiver fails pending `invoke_and_wait` callers.
    drop(receiver);
    Ok(gui)
}
