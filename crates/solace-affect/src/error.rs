//! Affect error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffectError {
    /// The override endpoint call failed (network, HTTP status, timeout).
    #[error("Override call failed: {0}")]
    Remote(String),

    /// The override endpoint returned a body we could not use.
    #[error("Invalid override response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AffectError {
    fn from(error: reqwest::Error) -> Self {
        Self::Remote(error.to_string())
    }
}
