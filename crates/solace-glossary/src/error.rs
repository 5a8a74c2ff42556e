//! Glossary error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlossaryError {
    /// The glossary file is not a JSON array of entries.
    #[error("Invalid glossary: {0}")]
    InvalidGlossary(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
