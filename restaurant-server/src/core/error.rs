//! Startup and serving errors
//!
//! Request-level failures use [`AppError`](crate::AppError); this type only
//! covers what can stop the process: bad configuration, an unreachable
//! database, or a listener that cannot bind.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for startup code
pub type Result<T> = std::result::Result<T, ServerError>;
