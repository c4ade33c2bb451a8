pub mod add;
pub mod auto_sync;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod random;
pub mod sync;
pub mod watch;
