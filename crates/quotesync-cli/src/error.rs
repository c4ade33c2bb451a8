use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quotesync_core::Error),
    #[error(transparent)]
    Remote(#[from] quotesync_core::sync::RemoteError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No quote text provided")]
    EmptyContent,
    #[error("Quote ID cannot be empty")]
    EmptyQuoteId,
    #[error("{0}")]
    InvalidQuoteId(String),
    #[error("Sync failed (maybe offline): {0}")]
    SyncFailed(String),
    #[error("Failed to resolve {0} directory")]
    MissingDirectory(&'static str),
}
