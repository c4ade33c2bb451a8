use std::path::Path;

use quotesync_core::export::render_quotes_export;
use quotesync_core::services::QuoteSession;

use crate::cli::ExportFormat;
use crate::error::CliError;

pub async fn run_export(
    session: &QuoteSession,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let quotes = session.quotes().await?;
    let rendered = render_quotes_export(&quotes, format.into())?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
