//! Error types for quotesync-core

use thiserror::Error;

use crate::models::QuoteId;
use crate::sync::RemoteError;

/// Result type alias using quotesync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quotesync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Quote not found
    #[error("Quote not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two records with the same identity were about to be written
    #[error("Duplicate quote id: {0}")]
    DuplicateIdentity(QuoteId),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote source failure
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
