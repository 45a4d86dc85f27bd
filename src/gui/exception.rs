//! Exception handling for errors raised while processing input or redrawing.

use tracing::error;

use crate::error::{GuiError, Result};

/// What the loop does after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Drop the error and keep running.
    Continue,
    /// End the loop, reporting the error as [`GuiError::UnhandledRender`].
    Rethrow,
}

pub trait ExceptionHandler: Send {
    fn on_error(&mut self, error: &GuiError) -> ErrorPolicy;
}

impl<F> ExceptionHandler for F
where
    F: FnMut(&GuiError) -> ErrorPolicy + Send,
{
    fn on_error(&mut self, error: &GuiError) -> ErrorPolicy {
        self(error)
    }
}

/// Default handler of the dedicated thread: log at error level, continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndContinue;

impl ExceptionHandler for LogAndContinue {
    fn on_error(&mut self, err: &GuiError) -> ErrorPolicy {
        error!(error = %err, "error in GUI event loop");
        ErrorPolicy::Continue
    }
}

/// Always rethrow.
#[derive(Debug, Clone, Copy, Default)]
pub struct RethrowAll;

impl ExceptionHandler for RethrowAll {
    fn on_error(&mut self, _error: &GuiError) -> ErrorPolicy {
        ErrorPolicy::Rethrow
    }
}

/// Apply `handler` to `error`. Without a handler the error propagates as is.
pub(crate) fn route_error(
    handler: &mut Option<Box<dyn ExceptionHandler>>,
    error: GuiError,
) -> Result<()> {
    let Some(handler) = handler.as_mut() else {
        return Err(error);
    };
    match handler.on_error(&error) {
        ErrorPolicy::Continue => Ok(()),
        ErrorPolicy::Rethrow => Err(GuiError::UnhandledRender(Box::new(error))),
    }
}
