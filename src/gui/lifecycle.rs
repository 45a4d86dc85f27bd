//! Lifecycle - the shared `Created → Started → Stopping → Stopped` machine.
//!
//! One [`Lifecycle`] is shared (behind an `Arc`) by a GUI thread, every
//! [`ActionSender`](super::ActionSender) cloned from it and every
//! [`WaitInterrupter`]. Transitions only move forward; waiters block on a
//! condition variable until `Stopped`.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{GuiError, Result};

use super::GuiThreadState;

#[derive(Debug)]
struct LifecycleState {
    state: GuiThreadState,
    thread: Option<ThreadId>,
    /// True while a cooperative iteration is running.
    in_iteration: bool,
    /// Bumped by every interrupt; waiters compare against their snapshot.
    interrupt_epoch: u64,
}

#[derive(Debug)]
pub(crate) struct Lifecycle {
    inner: Mutex<LifecycleState>,
    changed: Condvar,
    /// Cooperative loops stop immediately when not mid-iteration, since no
    /// other context would ever finish the transition.
    cooperative: bool,
}

impl Lifecycle {
    pub(crate) fn new(cooperative: bool) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(LifecycleState {
                state: GuiThreadState::Created,
                thread: None,
                in_iteration: false,
                interrupt_epoch: 0,
            }),
            changed: Condvar::new(),
            cooperative,
        })
    }

    fn lock(&self) -> MutexGuard<'_, LifecycleState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> GuiThreadState {
        self.lock().state
    }

    pub(crate) fn thread_id(&self) -> Option<ThreadId> {
        self.lock().thread
    }

    /// True if the caller is the thread running the loop.
    pub(crate) fn is_current_thread(&self) -> bool {
        self.lock().thread == Some(thread::current().id())
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// `Created → Started`.
    pub(crate) fn start(&self, thread: Option<ThreadId>) -> Result<()> {
        let mut inner = self.lock();
        if inner.state != GuiThreadState::Created {
            return Err(GuiError::InvalidStateTransition {
                operation: "start",
                state: inner.state,
            });
        }
        inner.state = GuiThreadState::Started;
        inner.thread = thread;
        debug!(cooperative = self.cooperative, "GUI thread started");
        self.changed.notify_all();
        Ok(())
    }

    /// Record the thread that owns the loop.
    pub(crate) fn bind_thread(&self, thread: ThreadId) {
        self.lock().thread = Some(thread);
    }

    /// `Started → Stopping` (or straight to `Stopped` for an idle
    /// cooperative loop). Repeated stops are no-ops.
    pub(crate) fn request_stop(&self) -> Result<()> {
        let mut inner = self.lock();
        match inner.state {
            GuiThreadState::Created => Err(GuiError::InvalidStateTransition {
                operation: "stop",
                state: inner.state,
            }),
            GuiThreadState::Started => {
                if self.cooperative && !inner.in_iteration {
                    inner.state = GuiThreadState::Stopped;
                    debug!("GUI thread stopped");
                } else {
                    inner.state = GuiThreadState::Stopping;
                    debug!("GUI thread stopping");
                }
                self.changed.notify_all();
                Ok(())
            }
            GuiThreadState::Stopping | GuiThreadState::Stopped => Ok(()),
        }
    }

    /// Mark the start of one loop iteration. False unless `Started`.
    pub(crate) fn begin_iteration(&self) -> bool {
        let mut inner = self.lock();
        if inner.state != GuiThreadState::Started {
            return false;
        }
        inner.in_iteration = true;
        if self.cooperative {
            inner.thread = Some(thread::current().id());
        }
        true
    }

    /// Mark the end of an iteration, completing a stop requested during it.
    pub(crate) fn end_iteration(&self) {
        let mut inner = self.lock();
        inner.in_iteration = false;
        if self.cooperative && inner.state == GuiThreadState::Stopping {
            inner.state = GuiThreadState::Stopped;
            debug!("GUI thread stopped");
            self.changed.notify_all();
        }
    }

    /// The loop is gone: `Stopped`, whatever the state was.
    pub(crate) fn finish(&self) {
        let mut inner = self.lock();
        inner.in_iteration = false;
        if inner.state != GuiThreadState::Stopped {
            inner.state = GuiThreadState::Stopped;
            debug!("GUI thread stopped");
        }
        self.changed.notify_all();
    }

    // =========================================================================
    // WAITING
    // =========================================================================

    /// Block until `Stopped`, at most `timeout` if given.
    pub(crate) fn wait_for_stop(&self, timeout: Option<Duration>) -> Result<()> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut inner = self.lock();
        if inner.state == GuiThreadState::Stopped {
            return Ok(());
        }
        if inner.state == GuiThreadState::Created {
            return Err(GuiError::InvalidStateTransition {
                operation: "wait for stop",
                state: inner.state,
            });
        }
        if inner.thread == Some(thread::current().id()) {
            return Err(GuiError::InvalidStateTransition {
                operation: "wait for stop from the GUI thread",
                state: inner.state,
            });
        }

        let epoch = inner.interrupt_epoch;
        while inner.state != GuiThreadState::Stopped {
            if inner.interrupt_epoch != epoch {
                return Err(GuiError::InterruptedWait);
            }
            match (deadline, timeout) {
                (Some(deadline), Some(timeout)) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(GuiError::TimedOut(timeout));
                    }
                    let (guard, _) = self
                        .changed
                        .wait_timeout(inner, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner);
                    inner = guard;
                }
                _ => {
                    inner = self.changed.wait(inner).unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
        Ok(())
    }

    /// Fail every wait that is currently blocked with `InterruptedWait`.
    pub(crate) fn interrupt(&self) {
        self.lock().interrupt_epoch += 1;
        self.changed.notify_all();
    }
}

// =============================================================================
// WAIT INTERRUPTER
// =============================================================================

/// Cancels blocked `wait_for_stop` calls from another context.
#[derive(Debug, Clone)]
pub struct WaitInterrupter {
    pub(crate) lifecycle: Arc<Lifecycle>,
}

impl WaitInterrupter {
    /// Waits already blocked fail with [`GuiError::InterruptedWait`]. Later
    /// waits are unaffected.
    pub fn interrupt(&self) {
        self.lifecycle.interrupt();
    }
}

/// Marks the lifecycle `Stopped` when dropped, including on unwind.
pub(crate) struct FinishGuard<'a>(pub(crate) &'a Lifecycle);

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}
