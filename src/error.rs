//! Error types shared by the tree, the pane and the GUI threads.

use std::time::Duration;

use crate::engine::ComponentId;
use crate::gui::GuiThreadState;

/// Every failure the core reports.
#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    /// A lifecycle operation was called from a state that does not allow it.
    #[error("cannot {operation} while the GUI thread is {state:?}")]
    InvalidStateTransition {
        operation: &'static str,
        state: GuiThreadState,
    },

    /// A blocking wait was cancelled from outside.
    #[error("wait for GUI thread stop was interrupted")]
    InterruptedWait,

    /// A bounded wait expired before the GUI thread stopped.
    #[error("GUI thread did not stop within {0:?}")]
    TimedOut(Duration),

    /// The component is not attached to the pane/container the operation needs.
    #[error("component {0:?} is not attached to a pane")]
    DetachedComponentOperation(ComponentId),

    /// The id does not refer to a live component.
    #[error("component {0:?} does not exist")]
    ComponentNotFound(ComponentId),

    /// The component cannot hold children.
    #[error("component {0:?} is not a container")]
    NotAContainer(ComponentId),

    /// Attaching the component would make it its own ancestor.
    #[error("component {0:?} cannot be attached below itself")]
    CyclicHierarchy(ComponentId),

    /// The component cannot take focus right now.
    #[error("component {0:?} cannot receive focus")]
    NotFocusable(ComponentId),

    /// An input or redraw error the exception handler chose to rethrow.
    #[error("unhandled error in GUI event loop: {0}")]
    UnhandledRender(#[source] Box<GuiError>),

    /// The dedicated GUI thread went away without reporting a result.
    #[error("GUI thread terminated unexpectedly")]
    ThreadTerminated,

    /// Screen I/O failure.
    #[error("screen I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GuiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let err: GuiError = std::io::Error::other("boom").into();
        assert!(matches!(err, GuiError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_state_transition_message() {
        let err = GuiError::InvalidStateTransition {
            operation: "start",
            state: GuiThreadState::Stopped,
        };
        assert_eq!(err.to_string(), "cannot start while the GUI thread is Stopped");
    }

    #[test]
    fn test_unhandled_render_keeps_source() {
        use std::error::Error;
        let err = GuiError::UnhandledRender(Box::new(GuiError::TimedOut(Duration::from_secs(1))));
        assert!(err.source().is_some());
    }
}
