//! Parser error types for solace-protocol.

/// Errors that can occur during knowledge-base parsing.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A combined export section is missing its source-file header.
    #[error("Missing '# SOURCE FILE:' header in export section")]
    MissingSourceHeader,

    /// The document does not match the expected structure.
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
