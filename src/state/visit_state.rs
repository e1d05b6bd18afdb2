/// Visit state definitions for tracking address progress
///
/// An address that has never been claimed is "unseen" and has no entry at all;
/// once claimed it moves forward through these states and never goes back.
use serde::Serialize;
use std::fmt;

/// Represents the current state of a claimed address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    /// Address has been claimed and its fetch-and-expand unit has not finished
    InProgress,

    /// Address was fetched and its links were expanded
    Succeeded,

    /// Fetch failed or the unit was cancelled before it could fetch
    Failed,
}

impl VisitState {
    /// Returns true if no further processing will happen for this address
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Checks if a transition from this state to another is valid
    ///
    /// Only `InProgress` may move, and only to a terminal state.
    pub fn can_transition_to(&self, next: VisitState) -> bool {
        matches!(self, Self::InProgress) && next.is_terminal()
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InProgress => "in progress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
