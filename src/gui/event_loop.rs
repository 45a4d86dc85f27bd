//! The iteration body shared by both thread models.

use std::sync::mpsc::Receiver;

use tracing::trace;

use crate::error::Result;

use super::action::GuiMessage;
use super::exception::{route_error, ExceptionHandler};
use super::lifecycle::Lifecycle;
use super::TextGui;

/// Run the actions queued so far, drain input, redraw if needed.
///
/// Returns true if any work was done. Errors from input or redraw go
/// through `handler`; only what it rethrows (or everything, without a
/// handler) comes back as `Err`.
pub(crate) fn run_iteration(
    gui: &mut TextGui,
    receiver: &Receiver<GuiMessage>,
    handler: &mut Option<Box<dyn ExceptionHandler>>,
    lifecycle: &Lifecycle,
) -> Result<bool> {
    // Only what is queued now; actions queued by actions wait a turn.
    let queued: Vec<GuiMessage> = receiver.try_iter().collect();
    let mut worked = run_actions(gui, queued);

    match gui.process_input() {
        Ok(processed) => worked |= processed,
        Err(error) => route_error(handler, error)?,
    }
    if gui.is_input_closed() {
        lifecycle.request_stop()?;
    }

    if gui.is_pending_update() {
        match gui.update_screen() {
            Ok(()) => worked = true,
            Err(error) => route_error(handler, error)?,
        }
    }
    Ok(worked)
}

/// Run every `Run` message in order. True if at least one ran.
pub(crate) fn run_actions(gui: &mut TextGui, messages: impl IntoIterator<Item = GuiMessage>) -> bool {
    let mut ran = 0usize;
    for message in messages {
        if let GuiMessage::Run(action) = message {
            action(gui);
            ran += 1;
        }
    }
    if ran > 0 {
        trace!(ran, "ran queued actions");
    }
    ran > 0
}
