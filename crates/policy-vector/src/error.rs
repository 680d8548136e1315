//! Error types for policy-vector.

use thiserror::Error;

/// Result type for policy-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in policy-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimension mismatch between a vector and the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., zero dimensions, contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Index file does not exist.
    #[error("Index file not found: {0}")]
    NotFound(String),

    /// Persistence error (encoding, corrupt file).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
