use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use quotesync_core::config::SyncConfig;
use quotesync_core::db::Database;
use quotesync_core::models::{Conflict, Origin};
use quotesync_core::notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
use quotesync_core::services::QuoteSession;
use quotesync_core::sync::{HttpRemoteSource, RemoteSource};
use quotesync_core::{Quote, QuoteId};
use serde::Serialize;

use crate::error::CliError;

const APP_DIR: &str = "quotesync";
const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "quotes.db";

#[derive(Debug, Serialize)]
pub struct QuoteListItem {
    pub id: String,
    pub text: String,
    pub author: String,
    pub origin: Origin,
    pub updated_at: i64,
    pub relative_time: String,
}

/// Prints session notices to stderr so stdout stays machine readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warn => eprintln!("warning: {notice}"),
            NoticeLevel::Info | NoticeLevel::Ok => eprintln!("{notice}"),
        }
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("QUOTES_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(DB_FILE_NAME))
        .ok_or(CliError::MissingDirectory("data"))
}

pub fn resolve_config_path(cli_config_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_config_path {
        return Ok(path);
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
        .ok_or(CliError::MissingDirectory("config"))
}

/// Defaults, then the config file, then `QUOTES_*` environment overrides.
pub fn load_sync_config(path: &Path) -> Result<SyncConfig, CliError> {
    let config = SyncConfig::load_from_path(path)?.with_env_overrides()?;
    Ok(config)
}

pub fn open_session(db_path: &Path, config: SyncConfig) -> Result<QuoteSession, CliError> {
    let remote: Arc<dyn RemoteSource> = Arc::new(HttpRemoteSource::new(&config)?);
    open_session_with_remote(db_path, config, remote)
}

pub fn open_session_with_remote(
    db_path: &Path,
    config: SyncConfig,
    remote: Arc<dyn RemoteSource>,
) -> Result<QuoteSession, CliError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::open(db_path)?;
    let notifier = session_notifier(io::stderr().is_terminal());
    Ok(QuoteSession::new(db, remote, config, notifier))
}

/// Plain messages on a terminal; structured log lines when stderr is piped.
pub fn session_notifier(interactive: bool) -> Arc<dyn Notifier> {
    if interactive {
        Arc::new(ConsoleNotifier)
    } else {
        Arc::new(TracingNotifier)
    }
}

pub fn parse_quote_id(id: &str) -> Result<QuoteId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyQuoteId);
    }
    trimmed
        .parse::<QuoteId>()
        .map_err(|error| CliError::InvalidQuoteId(error.to_string()))
}

/// Quote text from arguments, falling back to piped stdin.
pub fn resolve_quote_text(text_parts: &[String]) -> Result<String, CliError> {
    if let Some(text) = normalize_content(&text_parts.join(" ")) {
        return Ok(text);
    }

    if let Some(text) = read_piped_stdin()? {
        return Ok(text);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn filter_quotes(quotes: Vec<Quote>, origin: Option<Origin>, limit: usize) -> Vec<Quote> {
    quotes
        .into_iter()
        .filter(|quote| origin.is_none_or(|origin| quote.origin == origin))
        .take(limit)
        .collect()
}

pub fn format_quote_lines(quotes: &[Quote]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    quotes
        .iter()
        .map(|quote| {
            let id = quote.id.to_string();
            let short_id = id.chars().take(14).collect::<String>();
            let preview = quote_preview(&quote.text, 48);
            let relative_time = format_relative_time(quote.updated_at, now_ms);
            format!(
                "{short_id:<14}  {preview:<48}  {:<18}  {:<6}  {relative_time}",
                quote.display_author(),
                quote.origin
            )
        })
        .collect()
}

pub fn quote_to_list_item(quote: &Quote) -> QuoteListItem {
    let now_ms = Utc::now().timestamp_millis();
    QuoteListItem {
        id: quote.id.to_string(),
        text: quote.text.clone(),
        author: quote.display_author().to_string(),
        origin: quote.origin,
        updated_at: quote.updated_at,
        relative_time: format_relative_time(quote.updated_at, now_ms),
    }
}

pub fn format_quote_block(quote: &Quote) -> String {
    format!("\"{}\"\n  -- {}", quote.text, quote.display_author())
}

pub fn format_conflict_lines(conflicts: &[Conflict]) -> Vec<String> {
    conflicts
        .iter()
        .map(|conflict| {
            format!(
                "{}  local: \"{}\" ({})  remote: \"{}\" ({})",
                conflict.id,
                quote_preview(&conflict.local.text, 32),
                conflict.local.display_author(),
                quote_preview(&conflict.remote.text, 32),
                conflict.remote.display_author()
            )
        })
        .collect()
}

pub fn quote_preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
