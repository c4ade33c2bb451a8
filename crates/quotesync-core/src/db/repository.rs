//! Quote repository implementation

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{Origin, Quote};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

/// Trait for quote storage operations
///
/// The store is always read and rewritten as a whole collection.
pub trait QuoteRepository {
    /// Load every quote, most recently updated first
    fn load(&self) -> Result<Vec<Quote>>;

    /// Replace the stored collection with `quotes`
    ///
    /// Fails without writing anything when two quotes share an id or a quote
    /// has empty text.
    fn save(&self, quotes: &[Quote]) -> Result<()>;
}

/// `SQLite` implementation of `QuoteRepository`
pub struct SqliteQuoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteQuoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a quote from a database row
    fn parse_quote(row: &rusqlite::Row<'_>) -> rusqlite::Result<Quote> {
        let id: String = row.get(0)?;
        let origin: String = row.get(4)?;
        Ok(Quote {
            id: id
                .parse()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
            text: row.get(1)?,
            author: row.get(2)?,
            updated_at: row.get(3)?,
            origin: origin.parse::<Origin>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into())
            })?,
        })
    }
}

/// Enforce the store invariants before a write.
pub fn validate_collection(quotes: &[Quote]) -> Result<()> {
    let mut seen = HashSet::with_capacity(quotes.len());
    for quote in quotes {
        if !seen.insert(&quote.id) {
            return Err(Error::DuplicateIdentity(quote.id.clone()));
        }
        if quote.is_empty() {
            return Err(Error::InvalidInput(format!(
                "quote {} has empty text",
                quote.id
            )));
        }
    }
    Ok(())
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn load(&self) -> Result<Vec<Quote>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, author, updated_at, origin
             FROM quotes
             ORDER BY updated_at DESC, rowid ASC",
        )?;

        let quotes = stmt
            .query_map([], Self::parse_quote)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(quotes)
    }

    fn save(&self, quotes: &[Quote]) -> Result<()> {
        validate_collection(quotes)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM quotes", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO quotes (id, text, author, updated_at, origin) VALUES (?, ?, ?, ?, ?)",
            )?;
            for quote in quotes {
                stmt.execute(params![
                    quote.id.to_string(),
                    quote.text,
                    quote.author,
                    quote.updated_at,
                    quote.origin.as_str()
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Saved {} quotes", quotes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::QuoteId;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn quote(id: QuoteId, text: &str, updated_at: i64, origin: Origin) -> Quote {
        Quote {
            id,
            text: text.to_string(),
            author: "Someone".to_string(),
            updated_at,
            origin,
        }
    }

    #[test]
    fn test_save_and_load() {
        let db = setup();
        let repo = SqliteQuoteRepository::new(db.connection());

        let quotes = vec![
            quote(QuoteId::Remote(1), "older", 10, Origin::Remote),
            quote(QuoteId::Local("a".into()), "newer", 20, Origin::Local),
        ];
        repo.save(&quotes).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, vec![quotes[1].clone(), quotes[0].clone()]);
    }

    #[test]
    fn test_save_replaces_collection() {
        let db = setup();
        let repo = SqliteQuoteRepository::new(db.connection());

        repo.save(&[quote(QuoteId::Remote(1), "a", 1, Origin::Remote)])
            .unwrap();
        repo.save(&[quote(QuoteId::Remote(2), "b", 2, Origin::Remote)])
            .unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, QuoteId::Remote(2));
    }

    #[test]
    fn test_save_rejects_duplicate_ids_without_writing() {
        let db = setup();
        let repo = SqliteQuoteRepository::new(db.connection());

        let existing = quote(QuoteId::Remote(9), "keep", 1, Origin::Remote);
        repo.save(std::slice::from_ref(&existing)).unwrap();

        let result = repo.save(&[
            quote(QuoteId::Remote(1), "a", 1, Origin::Remote),
            quote(QuoteId::Remote(1), "b", 2, Origin::Local),
        ]);
        assert!(matches!(
            result,
            Err(Error::DuplicateIdentity(QuoteId::Remote(1)))
        ));
        assert_eq!(repo.load().unwrap(), vec![existing]);
    }

    #[test]
    fn test_save_rejects_empty_text() {
        let db = setup();
        let repo = SqliteQuoteRepository::new(db.connection());

        let result = repo.save(&[quote(QuoteId::Remote(1), "   ", 1, Origin::Remote)]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_load_preserves_saved_order_on_ties() {
        let db = setup();
        let repo = SqliteQuoteRepository::new(db.connection());

        let quotes = vec![
            quote(QuoteId::Remote(3), "c", 7, Origin::Remote),
            quote(QuoteId::Remote(1), "a", 7, Origin::Remote),
            quote(QuoteId::Remote(2), "b", 7, Origin::Remote),
        ];
        repo.save(&quotes).unwrap();

        assert_eq!(repo.load().unwrap(), quotes);
    }
}
