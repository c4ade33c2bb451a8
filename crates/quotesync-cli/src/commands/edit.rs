use quotesync_core::services::QuoteSession;

use crate::commands::common::{parse_quote_id, resolve_quote_text};
use crate::error::CliError;

pub async fn run_edit(
    session: &QuoteSession,
    id: &str,
    text_parts: &[String],
    author: Option<&str>,
) -> Result<(), CliError> {
    let id = parse_quote_id(id)?;
    let text = resolve_quote_text(text_parts)?;

    let updated = session.edit_quote(&id, &text, author).await?;
    println!("{}", updated.id);
    Ok(())
}
