use std::path::Path;

use quotesync_core::export::parse_json_import;
use quotesync_core::services::QuoteSession;

use crate::error::CliError;

pub async fn run_import(session: &QuoteSession, path: &Path) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(path)?;
    let quotes = parse_json_import(&payload)?;
    let count = session.import_quotes(quotes).await?;

    println!("{count}");
    Ok(())
}
