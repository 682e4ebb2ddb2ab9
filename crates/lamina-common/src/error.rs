//! Error types for LaminaDB.

use thiserror::Error;

/// Result type alias using LaminaError.
pub type Result<T> = std::result::Result<T, LaminaError>;

/// Errors that can occur in LaminaDB operations.
///
/// Strategy disagreement is deliberately not represented here: the
/// verification harness reports disagreements as data, not as errors.
#[derive(Debug, Error)]
pub enum LaminaError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index file truncated: expected {expected} bytes, got {actual}")]
    IndexTruncated { expected: u64, actual: u64 },

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },

    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),
}
