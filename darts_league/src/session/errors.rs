//! Session error types.

use super::api::{ActionResult, ApiError};
use crate::tournament::{errors::EditorError, models::TournamentId};
use thiserror::Error;

/// Session errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Tournament does not exist on the server
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    /// Server call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local edit rejected
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Dismissable error panel raised when the server refuses an action
///
/// Local edits are kept when this is raised; retrying is left to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveError {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

impl<T> From<ActionResult<T>> for SaveError {
    fn from(result: ActionResult<T>) -> Self {
        Self {
            errors: result.errors,
            warnings: result.warnings,
            messages: result.messages,
        }
    }
}
