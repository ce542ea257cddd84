//! Common error types for Pressline

use thiserror::Error;

/// Common result type for Pressline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Pressline crates
#[derive(Error, Debug)]
pub enum Error {
    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requester is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Current state does not permit the requested transition
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
