//! Common error types for folio-web

use thiserror::Error;

/// Common result type for folio-web operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the store and HTTP layers
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
