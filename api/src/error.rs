//! Failure taxonomy for a dashboard refresh cycle.

use thiserror::Error;

/// Everything that can interrupt a refresh. None of these are fatal: the
/// controller surfaces the message and returns to an idle, re-triggerable
/// state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshError {
    /// Required filter fields are missing or inconsistent. Raised locally,
    /// before any network call is made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered but reported a semantic error in its payload.
    #[error("{0}")]
    Business(String),

    /// The payload was well-formed but carried none of the metric keys.
    /// Surfaced as a muted informational state, not an error dialog.
    #[error("no data available for the selected filters")]
    EmptyResult,

    /// Network or server failure. Carries the server-provided message when
    /// one could be recovered, otherwise a generic fallback.
    #[error("{0}")]
    Transport(String),
}

impl RefreshError {
    pub fn generic_transport() -> Self {
        Self::Transport("Unable to load dashboard data".to_string())
    }
}
