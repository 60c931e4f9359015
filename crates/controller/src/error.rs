//! Error kinds surfaced by the controller. Every variant is recoverable: the
//! router turns it into an error-flagged status message and keeps running.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Unknown template '{0}'")]
    TemplateNotFound(String),
    #[error("Could not start placement: {0}")]
    SessionStartFailed(String),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
    #[error("The object no longer exists")]
    StaleReference,
    #[error("Action rejected: {0}")]
    ExecutorRejected(ExecutorError),
    #[error("Not available right now: {0}")]
    InvalidModeForOperation(&'static str),
    #[error("Another action is still in progress")]
    ActionInFlight,
    /// The executor confirmed a placement but did not say which instance it
    /// made, so the result cannot take part in history.
    #[error("Placed {0}, but the executor reported no instance")]
    MissingInstance(String),
    #[error("The executor did not answer; {0} was abandoned")]
    ExecutorTimeout(String),
}

/// Verdict returned by the authoritative executor when it declines a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ExecutorError {
    #[error("unknown template")]
    UnknownTemplate,
    #[error("position is occupied")]
    Occupied,
    #[error("object not found")]
    NotFound,
    #[error("executor unavailable")]
    Unavailable,
    #[error("{0}")]
    Rejected(String),
}

impl From<ExecutorError> for ControllerError {
    fn from(err: ExecutorError) -> Self {
        ControllerError::ExecutorRejected(err)
    }
}
