//! Error types for vertexanim

use thiserror::Error;

/// Main error type for vertexanim operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for vertexanim operations
pub type Result<T> = std::result::Result<T, Error>;
