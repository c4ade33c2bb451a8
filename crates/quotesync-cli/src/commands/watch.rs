use quotesync_core::models::Choice;
use quotesync_core::services::{Intent, QuoteSession};
use quotesync_core::QuoteId;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{format_conflict_lines, format_quote_lines};
use crate::error::CliError;

const HELP: &str = "commands: sync | list | conflicts | resolve <id> <local|remote> | auto <on|off> | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Sync,
    List,
    Conflicts,
    Resolve { id: QuoteId, choice: Choice },
    Auto(bool),
    Help,
    Quit,
}

/// Parse one line typed into `quotes watch`. Blank lines yield `None`.
pub fn parse_watch_command(line: &str) -> Result<Option<WatchCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args = words.collect::<Vec<_>>();

    let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("sync", []) => WatchCommand::Sync,
        ("list" | "ls", []) => WatchCommand::List,
        ("conflicts", []) => WatchCommand::Conflicts,
        ("resolve", [id, side]) => WatchCommand::Resolve {
            id: id.parse().map_err(|error| format!("{error}"))?,
            choice: side.parse()?,
        },
        ("auto", ["on"]) => WatchCommand::Auto(true),
        ("auto", ["off"]) => WatchCommand::Auto(false),
        ("help" | "?", []) => WatchCommand::Help,
        ("quit" | "exit" | "q", []) => WatchCommand::Quit,
        _ => return Err(format!("unrecognized command '{}'; {HELP}", line.trim())),
    };
    Ok(Some(command))
}

pub async fn run_watch(session: &QuoteSession) -> Result<(), CliError> {
    let view = session.init().await?;
    if view.settings.auto_sync_enabled {
        println!(
            "Auto sync on (every {}s). Ctrl-C to stop.",
            session.config().sync_interval_secs
        );
    } else {
        println!("Auto sync is off; type `auto on` to enable it.");
    }
    println!("{HELP}");

    execute(session, WatchCommand::Sync).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_watch_command(&line) {
                    Ok(None) => {}
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(error) = execute(session, command).await {
                            eprintln!("Error: {error}");
                        }
                    }
                    Err(message) => eprintln!("{message}"),
                }
            }
        }
    }

    tracing::debug!("Leaving watch mode");
    Ok(())
}

pub async fn execute(session: &QuoteSession, command: WatchCommand) -> Result<(), CliError> {
    match command {
        WatchCommand::Sync => {
            let outcome = session.dispatch(Intent::TriggerSync).await?;
            if let Some(report) = outcome.report {
                println!("{}", report.status_line());
            }
            for line in format_conflict_lines(&outcome.view.conflicts) {
                println!("  {line}");
            }
        }
        WatchCommand::List => {
            for line in format_quote_lines(&session.quotes().await?) {
                println!("{line}");
            }
        }
        WatchCommand::Conflicts => {
            let pending = session.pending_conflicts().await;
            if pending.is_empty() {
                println!("No pending conflicts.");
            }
            for line in format_conflict_lines(&pending) {
                println!("{line}");
            }
        }
        WatchCommand::Resolve { id, choice } => {
            if session.resolve_conflict(&id, choice).await?.is_none() {
                println!("No pending conflict for {id}.");
            }
        }
        WatchCommand::Auto(enabled) => {
            session.dispatch(Intent::SetAutoSync { enabled }).await?;
        }
        WatchCommand::Help => println!("{HELP}"),
        WatchCommand::Quit => {}
    }
    Ok(())
}
