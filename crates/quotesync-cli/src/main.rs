//! quotes - keep a quote collection in sync from the command line
//!
//! Local edits stay on this machine; `quotes sync` pulls the remote window and
//! merges it in, flagging quotes that changed on both sides.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auto_sync::run_auto_sync;
use crate::commands::common::{load_sync_config, open_session, resolve_config_path, resolve_db_path};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::random::run_random;
use crate::commands::sync::run_sync;
use crate::commands::watch::run_watch;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["quotesync_core=info", "quotesync_cli=info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Completions need neither config nor store
    if let Some(Commands::Completions { shell, output }) = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let db_path = resolve_db_path(cli.db_path)?;
    let config_path = resolve_config_path(cli.config)?;
    let config = load_sync_config(&config_path)?;

    if let Some(Commands::Config { command }) = cli.command {
        return run_config(command, &config, &config_path, &db_path);
    }

    let session = open_session(&db_path, config)?;

    match cli.command {
        Some(Commands::Add { text, author }) => {
            run_add(&session, &text, author.as_deref()).await?;
        }
        Some(Commands::List {
            limit,
            origin,
            json,
        }) => run_list(&session, limit, origin.map(Into::into), json).await?,
        Some(Commands::Random { json }) => run_random(&session, json).await?,
        Some(Commands::Edit { id, text, author }) => {
            run_edit(&session, &id, &text, author.as_deref()).await?;
        }
        Some(Commands::Delete { id }) => run_delete(&session, &id).await?,
        Some(Commands::Sync { keep, json }) => {
            run_sync(&session, keep.map(Into::into), json).await?;
        }
        Some(Commands::AutoSync { state }) => run_auto_sync(&session, state.enabled()).await?,
        Some(Commands::Watch) => run_watch(&session).await?,
        Some(Commands::Export { format, output }) => {
            run_export(&session, format, output.as_deref()).await?;
        }
        Some(Commands::Import { path }) => run_import(&session, &path).await?,
        Some(Commands::Completions { .. } | Commands::Config { .. }) => {}
        None => {
            // Quick capture mode: quotes "words worth keeping"
            if cli.quote.is_empty() {
                Cli::command().print_help()?;
                println!();
            } else {
                run_add(&session, &cli.quote, None).await?;
            }
        }
    }

    Ok(())
}
