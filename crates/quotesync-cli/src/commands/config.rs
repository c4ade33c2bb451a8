use std::path::Path;

use quotesync_core::config::SyncConfig;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    config_path: String,
    config_file_present: bool,
    db_path: String,
    #[serde(flatten)]
    config: &'a SyncConfig,
}

pub fn run_config(
    command: ConfigCommands,
    config: &SyncConfig,
    config_path: &Path,
    db_path: &Path,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show { json } => run_config_show(config, config_path, db_path, json),
    }
}

pub fn run_config_show(
    config: &SyncConfig,
    config_path: &Path,
    db_path: &Path,
    as_json: bool,
) -> Result<(), CliError> {
    let report = ConfigReport {
        config_path: config_path.display().to_string(),
        config_file_present: config_path.exists(),
        db_path: db_path.display().to_string(),
        config,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let file_state = if report.config_file_present {
        ""
    } else {
        " (not found, using defaults)"
    };
    println!("config:        {}{file_state}", report.config_path);
    println!("database:      {}", report.db_path);
    println!("remote_url:    {}", config.remote_url);
    println!("fetch_limit:   {}", config.fetch_limit);
    println!("sync_interval: {}s", config.sync_interval_secs);
    println!("timeout:       {}s", config.request_timeout_secs);
    Ok(())
}
