//! Sync state and per-pass reports shared by every front end.

use serde::Serialize;

use crate::models::{Conflict, Quote};
use crate::util::format_timestamp;

/// Coarse sync state for status displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    #[default]
    Idle,
    Syncing,
    Synced,
    Error,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SyncReport {
    /// The merged collection was persisted
    Completed {
        quotes: Vec<Quote>,
        conflicts: Vec<Conflict>,
        synced_at: i64,
    },
    /// Fetch failed; the store was left untouched
    Failed { reason: String },
    /// Another pass was already in flight
    Skipped,
}

impl SyncReport {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// One-line status text.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self {
            Self::Completed {
                conflicts,
                synced_at,
                ..
            } => {
                let count = conflicts.len();
                let plural = if count == 1 { "" } else { "s" };
                format!(
                    "Synced at {}. ({count} conflict{plural})",
                    format_timestamp(*synced_at)
                )
            }
            Self::Failed { .. } => "Sync failed (maybe offline).".to_string(),
            Self::Skipped => "Sync already in progress.".to_string(),
        }
    }
}
