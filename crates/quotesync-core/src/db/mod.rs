//! Local record store for quotesync

mod connection;
mod migrations;
mod repository;
mod settings_repository;

pub use connection::Database;
pub use repository::{validate_collection, QuoteRepository, SqliteQuoteRepository};
pub use settings_repository::{SettingsRepository, SqliteSettingsRepository};
