//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing task fields
    #[error("{0}")]
    Validation(String),

    /// Malformed order/filter expression
    #[error("{0}")]
    Filter(String),

    /// Name or due date already taken by another task
    #[error("{0}")]
    Duplicate(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Filter(_) | Self::Duplicate(_)
        )
    }
}
