//! Tournament editing error types.

use super::models::SideId;
use thiserror::Error;
use uuid::Uuid;

/// Tournament editing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    /// Side rejected before being applied
    #[error("{0}")]
    Validation(String),

    /// No side with the given id
    #[error("Side not found: {0}")]
    SideNotFound(SideId),

    /// Side index past the end of the side list
    #[error("Side index {index} out of range ({len} sides)")]
    SideIndexOutOfRange { index: usize, len: usize },

    /// No match at the given index of a round
    #[error("Match index {index} out of range ({len} matches)")]
    MatchIndexOutOfRange { index: usize, len: usize },

    /// No match with the given id anywhere in the round chain
    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    /// No accolade entry at the given index
    #[error("Accolade index {0} out of range")]
    AccoladeIndexOutOfRange(usize),

    /// Destructive action declined
    #[error("Cancelled")]
    Cancelled,
}

impl EditorError {
    /// Whether the error came from a declined confirmation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EditorError::Cancelled)
    }
}

/// Result type for tournament editing
pub type EditorResult<T> = Result<T, EditorError>;
