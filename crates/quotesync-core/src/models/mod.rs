//! Data models for quotesync

mod conflict;
mod quote;
mod settings;

pub use conflict::{Choice, Conflict};
pub use quote::{
    Origin, ParseQuoteIdError, Quote, QuoteId, DEFAULT_LOCAL_AUTHOR, UNKNOWN_AUTHOR,
};
pub use settings::SyncSettings;
