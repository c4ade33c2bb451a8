//! Quote model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const LOCAL_PREFIX: &str = "local-";

/// Placeholder author for quotes added without attribution.
pub const DEFAULT_LOCAL_AUTHOR: &str = "You";

/// Placeholder shown when a quote has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Identity of a quote.
///
/// Remote ids are assigned by the upstream source; local ids carry a
/// `local-` prefix and therefore never collide with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuoteId {
    /// Generated on this device
    Local(String),
    /// Assigned by the remote source
    Remote(u64),
}

impl QuoteId {
    /// Create a fresh local id using UUID v7 (time-sortable)
    #[must_use]
    pub fn new_local() -> Self {
        Self::Local(Uuid::now_v7().simple().to_string())
    }

    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(token) => write!(f, "{LOCAL_PREFIX}{token}"),
            Self::Remote(id) => write!(f, "{id}"),
        }
    }
}

/// Error returned when a string is not a valid quote id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid quote id '{0}'")]
pub struct ParseQuoteIdError(String);

impl FromStr for QuoteId {
    type Err = ParseQuoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(token) = trimmed.strip_prefix(LOCAL_PREFIX) {
            if token.is_empty() {
                return Err(ParseQuoteIdError(s.to_string()));
            }
            return Ok(Self::Local(token.to_string()));
        }

        trimmed
            .parse::<u64>()
            .map(Self::Remote)
            .map_err(|_| ParseQuoteIdError(s.to_string()))
    }
}

impl TryFrom<String> for QuoteId {
    type Error = ParseQuoteIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuoteId> for String {
    fn from(value: QuoteId) -> Self {
        value.to_string()
    }
}

/// Where a quote's current value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Created or edited by a person on this device
    Local,
    /// Supplied by the remote source
    Remote,
}

impl Origin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" | "server" => Ok(Self::Remote),
            _ => Err(format!("unknown origin '{s}' (expected local or remote)")),
        }
    }
}

/// A quote in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier
    pub id: QuoteId,
    /// Quote body, non-empty after trimming
    pub text: String,
    /// Attribution
    pub author: String,
    /// Last write timestamp (Unix ms), used for ordering only
    pub updated_at: i64,
    /// Provenance of the current value
    pub origin: Origin,
}

impl Quote {
    /// Create a new local quote with a fresh id.
    ///
    /// Text and author are trimmed; an empty author becomes
    /// [`DEFAULT_LOCAL_AUTHOR`].
    #[must_use]
    pub fn new_local(text: &str, author: Option<&str>, now: i64) -> Self {
        Self {
            id: QuoteId::new_local(),
            text: text.trim().to_string(),
            author: normalize_author(author),
            updated_at: now,
            origin: Origin::Local,
        }
    }

    /// Return an edited copy: new content, new timestamp, local origin.
    #[must_use]
    pub fn edited(&self, text: &str, author: Option<&str>, now: i64) -> Self {
        Self {
            id: self.id.clone(),
            text: text.trim().to_string(),
            author: author.map_or_else(|| self.author.clone(), |a| a.trim().to_string()),
            updated_at: now,
            origin: Origin::Local,
        }
    }

    /// True when text and author match exactly.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.text == other.text && self.author == other.author
    }

    /// Author for display, falling back to [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn display_author(&self) -> &str {
        if self.author.trim().is_empty() {
            UNKNOWN_AUTHOR
        } else {
            &self.author
        }
    }

    /// Check if quote text is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn normalize_author(author: Option<&str>) -> String {
    author
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LOCAL_AUTHOR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ids_unique() {
        assert_ne!(QuoteId::new_local(), QuoteId::new_local());
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let local = QuoteId::new_local();
        assert_eq!(local.to_string().parse::<QuoteId>().unwrap(), local);
        assert_eq!("42".parse::<QuoteId>().unwrap(), QuoteId::Remote(42));
        assert_eq!(
            "local-5".parse::<QuoteId>().unwrap(),
            QuoteId::Local("5".to_string())
        );
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("".parse::<QuoteId>().is_err());
        assert!("local-".parse::<QuoteId>().is_err());
        assert!("abc".parse::<QuoteId>().is_err());
        assert!("-3".parse::<QuoteId>().is_err());
    }

    #[test]
    fn test_local_and_remote_never_equal() {
        assert_ne!(QuoteId::Local("1".to_string()), QuoteId::Remote(1));
    }

    #[test]
    fn test_id_serializes_as_string() {
        let json = serde_json::to_string(&QuoteId::Remote(7)).unwrap();
        assert_eq!(json, "\"7\"");
        let json = serde_json::to_string(&QuoteId::Local("ab".to_string())).unwrap();
        assert_eq!(json, "\"local-ab\"");
    }

    #[test]
    fn test_new_local_defaults_author() {
        let quote = Quote::new_local("  Hello  ", None, 10);
        assert_eq!(quote.text, "Hello");
        assert_eq!(quote.author, DEFAULT_LOCAL_AUTHOR);
        assert_eq!(quote.origin, Origin::Local);
        assert!(quote.id.is_local());

        let blank = Quote::new_local("Hi", Some("  "), 10);
        assert_eq!(blank.author, DEFAULT_LOCAL_AUTHOR);
    }

    #[test]
    fn test_edited_becomes_local() {
        let remote = Quote {
            id: QuoteId::Remote(3),
            text: "old".to_string(),
            author: "Server User 1".to_string(),
            updated_at: 1,
            origin: Origin::Remote,
        };
        let edited = remote.edited(" new ", None, 5);
        assert_eq!(edited.id, remote.id);
        assert_eq!(edited.text, "new");
        assert_eq!(edited.author, "Server User 1");
        assert_eq!(edited.updated_at, 5);
        assert_eq!(edited.origin, Origin::Local);
    }

    #[test]
    fn test_origin_parse_accepts_server_alias() {
        assert_eq!("server".parse::<Origin>().unwrap(), Origin::Remote);
        assert_eq!("LOCAL".parse::<Origin>().unwrap(), Origin::Local);
    }

    #[test]
    fn test_display_author_placeholder() {
        let mut quote = Quote::new_local("x", None, 0);
        quote.author = String::new();
        assert_eq!(quote.display_author(), UNKNOWN_AUTHOR);
    }
}
