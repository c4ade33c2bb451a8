//! quotesync-core - Core library for quotesync
//!
//! This crate contains the quote models, the local store, the merge engine
//! and the sync session used by every quotesync interface.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{Quote, QuoteId};
