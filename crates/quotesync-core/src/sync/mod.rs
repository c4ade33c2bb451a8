//! Pull-and-merge synchronization against a read-only remote.

mod conflicts;
mod merge;
mod remote;
mod scheduler;
#[cfg(test)]
pub(crate) mod testing;

pub use conflicts::ConflictSet;
pub use merge::{carry_forward, merge, MergeOutcome};
pub use remote::{normalize_posts, HttpRemoteSource, RemoteError, RemoteResult, RemoteSource};
pub use scheduler::{AutoSync, SyncRunner};
