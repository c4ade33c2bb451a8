//! Sync conflict model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Origin, Quote, QuoteId};

/// A same-identity pair of divergent quote versions awaiting a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Identity shared by both versions
    pub id: QuoteId,
    /// Version held locally before the merge pass
    pub local: Quote,
    /// Version supplied by the remote source
    pub remote: Quote,
}

/// Which version of a conflict to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Local,
    Remote,
}

impl Choice {
    /// Origin a resolved record carries after this choice.
    #[must_use]
    pub const fn origin(self) -> Origin {
        match self {
            Self::Local => Origin::Local,
            Self::Remote => Origin::Remote,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.origin().as_str())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Origin>().map(|origin| match origin {
            Origin::Local => Self::Local,
            Origin::Remote => Self::Remote,
        })
    }
}

impl Conflict {
    /// The version selected by `choice`.
    #[must_use]
    pub const fn version(&self, choice: Choice) -> &Quote {
        match choice {
            Choice::Local => &self.local,
            Choice::Remote => &self.remote,
        }
    }
}
