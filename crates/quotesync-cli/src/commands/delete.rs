use quotesync_core::services::QuoteSession;

use crate::commands::common::parse_quote_id;
use crate::error::CliError;

pub async fn run_delete(session: &QuoteSession, id: &str) -> Result<(), CliError> {
    let id = parse_quote_id(id)?;
    let removed = session.delete_quote(&id).await?;

    println!("{}", removed.id);
    Ok(())
}
