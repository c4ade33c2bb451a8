use quotesync_core::models::{Choice, Conflict};
use quotesync_core::services::QuoteSession;
use quotesync_core::state::SyncReport;
use serde::Serialize;

use crate::commands::common::format_conflict_lines;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub status: String,
    pub synced_at: Option<i64>,
    pub quote_count: usize,
    pub resolved: Vec<String>,
    pub kept: Option<Choice>,
    pub pending: Vec<Conflict>,
}

/// Run one pass and optionally settle every conflict it raised.
pub async fn sync_and_resolve(
    session: &QuoteSession,
    keep: Option<Choice>,
) -> Result<SyncOutput, CliError> {
    let report = session.sync_now().await?;
    let status = report.status_line();

    let (raised, synced_at, quote_count) = match report {
        SyncReport::Completed {
            quotes,
            conflicts,
            synced_at,
        } => (conflicts, Some(synced_at), quotes.len()),
        SyncReport::Failed { reason } => return Err(CliError::SyncFailed(reason)),
        SyncReport::Skipped => (Vec::new(), None, 0),
    };

    let mut resolved = Vec::new();
    if let Some(choice) = keep {
        for conflict in &raised {
            if session.resolve_conflict(&conflict.id, choice).await?.is_some() {
                resolved.push(conflict.id.to_string());
            }
        }
    }

    Ok(SyncOutput {
        status,
        synced_at,
        quote_count,
        resolved,
        kept: keep,
        pending: session.pending_conflicts().await,
    })
}

pub async fn run_sync(
    session: &QuoteSession,
    keep: Option<Choice>,
    as_json: bool,
) -> Result<(), CliError> {
    let output = sync_and_resolve(session, keep).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", output.status);
    if let (Some(choice), false) = (output.kept, output.resolved.is_empty()) {
        println!(
            "Resolved {} conflict(s): kept {choice}.",
            output.resolved.len()
        );
    }
    if !output.pending.is_empty() {
        println!("Pending conflicts (server version kept):");
        for line in format_conflict_lines(&output.pending) {
            println!("  {line}");
        }
        println!("Run `quotes sync --keep local` to restore your versions.");
    }
    Ok(())
}
