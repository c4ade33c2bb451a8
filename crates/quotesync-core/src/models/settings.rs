//! Persisted sync preferences

use serde::{Deserialize, Serialize};

/// Sync metadata kept alongside the quote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncSettings {
    /// Whether the periodic pull runs
    pub auto_sync_enabled: bool,
    /// Completion time of the last successful pass (Unix ms)
    pub last_sync_at: Option<i64>,
}
