// Error Taxonomy
// Every failure is a caller-input problem raised synchronously, before the
// tree is touched. Not-found is not an error and never shows up here.

use thiserror::Error;

/// Errors raised by tree construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Invalid configuration: order must be >= {min}, got {order}")]
    InvalidConfig { order: usize, min: usize },

    #[error("Invalid value: {reason}")]
    InvalidValue { reason: String },

    #[error("Duplicate key: {key} is already stored in the tree")]
    DuplicateKey { key: String },

    #[error("Failed to parse tree configuration: {message}")]
    ConfigParse { message: String },
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
