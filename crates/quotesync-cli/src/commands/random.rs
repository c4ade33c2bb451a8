use quotesync_core::services::QuoteSession;

use crate::commands::common::{format_quote_block, quote_to_list_item};
use crate::error::CliError;

pub async fn run_random(session: &QuoteSession, as_json: bool) -> Result<(), CliError> {
    let Some(quote) = session.random_quote().await? else {
        println!("No quotes yet.");
        return Ok(());
    };

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&quote_to_list_item(&quote))?
        );
    } else {
        println!("{}", format_quote_block(&quote));
    }
    Ok(())
}
