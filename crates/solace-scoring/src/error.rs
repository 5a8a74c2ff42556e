//! Scoring error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// An input field is out of range.
    #[error("Invalid input for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },
}

impl ScoringError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
