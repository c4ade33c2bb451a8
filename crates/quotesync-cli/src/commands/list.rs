use quotesync_core::models::Origin;
use quotesync_core::services::QuoteSession;

use crate::commands::common::{filter_quotes, format_quote_lines, quote_to_list_item, QuoteListItem};
use crate::error::CliError;

pub async fn run_list(
    session: &QuoteSession,
    limit: usize,
    origin: Option<Origin>,
    as_json: bool,
) -> Result<(), CliError> {
    let quotes = filter_quotes(session.quotes().await?, origin, limit);

    if as_json {
        let json_items = quotes
            .iter()
            .map(quote_to_list_item)
            .collect::<Vec<QuoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if quotes.is_empty() {
        println!("No quotes yet.");
    } else {
        for line in format_quote_lines(&quotes) {
            println!("{line}");
        }
    }

    Ok(())
}
