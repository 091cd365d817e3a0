//! Error types for Burrow

use thiserror::Error;

/// Burrow error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The clone primitive rejected the spawn request
    #[error("Spawn failed: {message}")]
    Spawn {
        /// Error message
        message: String,
    },

    /// The child's terminal status could not be retrieved
    #[error("Wait failed: {message}")]
    Wait {
        /// Error message
        message: String,
    },

    /// Invalid launch configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },
}

/// Result type alias for Burrow operations
pub type Result<T> = std::result::Result<T, Error>;
