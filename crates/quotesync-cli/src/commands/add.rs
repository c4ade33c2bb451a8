use quotesync_core::services::QuoteSession;

use crate::commands::common::resolve_quote_text;
use crate::error::CliError;

pub async fn run_add(
    session: &QuoteSession,
    text_parts: &[String],
    author: Option<&str>,
) -> Result<(), CliError> {
    let text = resolve_quote_text(text_parts)?;
    let quote = session.add_quote(&text, author).await?;

    println!("{}", quote.id);
    Ok(())
}
