//! Common error types for charhook

use thiserror::Error;

/// Common result type for charhook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the service and its tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Subscription type is not one of the known channels
    #[error("Invalid notification type: {0}")]
    InvalidChannel(String),
}
