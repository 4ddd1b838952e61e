//! Common error types for Fyyur

use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store and the web layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested entity not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// True when the error means the requested row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Database(sqlx::Error::RowNotFound))
    }
}
