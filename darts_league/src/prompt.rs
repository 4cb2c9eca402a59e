//! Confirmation and alert prompts shown to the person editing a tournament.
//!
//! Editors never talk to a terminal or a browser directly; they are handed a
//! [`Prompts`] implementation and report through it. The message texts are
//! part of the user-facing contract.

/// Alert raised when a side has neither a team nor players
pub const SELECT_TEAM_OR_PLAYERS: &str = "Select a team or some players";

/// Alert raised when a side name is blank
pub const ENTER_A_NAME: &str = "Please enter a name";

/// Confirmation before removing a match
pub const CONFIRM_REMOVE_MATCH: &str = "Are you sure you want to remove this match?";

/// Confirmation before deleting live-scoring data
pub const CONFIRM_DELETE_LIVE_SCORING: &str =
    "Are you sure you want to delete the sayg data for this match?";

/// Alert raised when a high checkout is out of range
pub const CHECKOUT_OUT_OF_RANGE: &str = "Checkout must be between 101 and 170";

/// Confirmation before removing a side
pub fn confirm_remove_side(name: &str) -> String {
    format!("Are you sure you want to remove {name}?")
}

/// Blocking user prompts
pub trait Prompts {
    /// Show a blocking message
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question, returning `true` on confirmation
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompts that record every message and answer confirmations with a fixed value
#[derive(Debug, Clone, Default)]
pub struct RecordingPrompts {
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
    pub answer: bool,
}

impl RecordingPrompts {
    /// Prompts that confirm everything
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    /// Prompts that decline everything
    pub fn declining() -> Self {
        Self::default()
    }
}

impl Prompts for RecordingPrompts {
    fn alert(&mut self, message: &str) {
        log::debug!("alert: {}", message);
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        log::debug!("confirm: {} -> {}", message, self.answer);
        self.confirmations.push(message.to_string());
        self.answer
    }
}
