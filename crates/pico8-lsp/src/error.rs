//! Error types for folding analysis

use thiserror::Error;

/// Result type for folding operations
pub type Result<T> = std::result::Result<T, FoldError>;

/// Precondition violations; everything else is tolerated by the analyzers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoldError {
    /// A conditional node was built without any clauses
    #[error("conditional starting at line {line:?} has no clauses")]
    EmptyConditional { line: Option<u32> },

    /// Document bytes are not UTF-8 text
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
