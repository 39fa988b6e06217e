//! Error types for the dynamic nearest-neighbor bit dictionary.

use thiserror::Error;

/// Error variants for dictionary operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An index was provided that is out of the structure's bounds.
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// An I/O error occurred during serialization or deserialization.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, Error>;
