//! Quote export and import helpers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Origin, Quote, QuoteId};
use crate::util::format_timestamp;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable quote representation used in JSON exports and imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportQuote {
    pub id: QuoteId,
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default = "default_origin")]
    pub origin: Origin,
}

const fn default_origin() -> Origin {
    Origin::Local
}

impl From<&Quote> for ExportQuote {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id.clone(),
            text: quote.text.clone(),
            author: quote.author.clone(),
            updated_at: quote.updated_at,
            origin: quote.origin,
        }
    }
}

impl From<ExportQuote> for Quote {
    fn from(item: ExportQuote) -> Self {
        Self {
            id: item.id,
            text: item.text,
            author: item.author,
            updated_at: item.updated_at,
            origin: item.origin,
        }
    }
}

/// Render quotes as pretty-printed JSON.
pub fn render_json_export(quotes: &[Quote]) -> serde_json::Result<String> {
    let items = quotes.iter().map(ExportQuote::from).collect::<Vec<_>>();
    serde_json::to_string_pretty(&items)
}

/// Render quotes as a Markdown list of block quotes.
#[must_use]
pub fn render_markdown_export(quotes: &[Quote]) -> String {
    let mut output = String::from("# Quotes\n");

    for quote in quotes {
        let _ = writeln!(output);
        for line in quote.text.lines() {
            let _ = writeln!(output, "> {line}");
        }
        let _ = writeln!(output, ">");
        let _ = writeln!(
            output,
            "> -- {} (`{}`, {}, updated {})",
            quote.display_author(),
            quote.id,
            quote.origin,
            format_timestamp(quote.updated_at)
        );
    }

    output
}

pub fn render_quotes_export(quotes: &[Quote], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(quotes),
        ExportFormat::Markdown => Ok(render_markdown_export(quotes)),
    }
}

/// Parse a JSON export back into quotes.
///
/// Only shape is checked here; identity and text rules are enforced when the
/// batch is imported.
pub fn parse_json_import(payload: &str) -> Result<Vec<Quote>> {
    let items: Vec<ExportQuote> = serde_json::from_str(payload)
        .map_err(|error| Error::InvalidInput(format!("invalid import file: {error}")))?;
    Ok(items.into_iter().map(Quote::from).collect())
}

#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("quotes-export-{timestamp_ms}.{}", format.extension())
}
