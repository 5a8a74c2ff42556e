//! Cross-cutting error types for Solace.
//!
//! Domain-specific errors (e.g. `ProtocolError`, `GlossaryError`) live in
//! their own crates. Everything converges on `anyhow` at the CLI boundary.

use thiserror::Error;

/// Errors that can be raised by any Solace crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lookup returned no result.
    #[error("Not found: {kind} {id}")]
    NotFound { kind: String, id: String },

    /// Data failed validation (format, range, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
