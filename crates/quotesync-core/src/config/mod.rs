//! Sync configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `QUOTES_*` environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Read-only mock endpoint the pull runs against by default.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";
/// Size of the fetched window.
pub const DEFAULT_FETCH_LIMIT: usize = 8;
/// Auto-sync period.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;
/// Network timeout for one fetch.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ENV_REMOTE_URL: &str = "QUOTES_REMOTE_URL";
pub const ENV_FETCH_LIMIT: &str = "QUOTES_FETCH_LIMIT";
pub const ENV_SYNC_INTERVAL_SECS: &str = "QUOTES_SYNC_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "QUOTES_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct SyncConfig {
    pub remote_url: String,
    pub fetch_limit: usize,
    pub sync_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SyncConfig {
    /// Load from a JSON file; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!("Failed to parse config at {}: {error}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUOTES_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = normalize_text_option(lookup(ENV_REMOTE_URL)) {
            self.remote_url = url;
        }
        if let Some(limit) = parse_override(&lookup, ENV_FETCH_LIMIT)? {
            self.fetch_limit = limit;
        }
        if let Some(interval) = parse_override(&lookup, ENV_SYNC_INTERVAL_SECS)? {
            self.sync_interval_secs = interval;
        }
        if let Some(timeout) = parse_override(&lookup, ENV_REQUEST_TIMEOUT_SECS)? {
            self.request_timeout_secs = timeout;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_http_url(self.remote_url.trim()) {
            return Err(Error::Config(
                "remote_url must include http:// or https://".to_string(),
            ));
        }
        if self.fetch_limit == 0 {
            return Err(Error::Config("fetch_limit must be at least 1".to_string()));
        }
        if self.sync_interval_secs == 0 {
            return Err(Error::Config(
                "sync_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = normalize_text_option(lookup(key)) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a positive integer, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = SyncConfig::default();
        config.validate().unwrap();
        assert_eq!(config.fetch_limit, 8);
        assert_eq!(config.sync_interval(), Duration::from_secs(30));
    }

    #[test]
    fn overrides_apply_and_validate() {
        let config = SyncConfig::default()
            .with_overrides(lookup(&[
                (ENV_REMOTE_URL, " http://localhost:3000/posts "),
                (ENV_FETCH_LIMIT, "3"),
                (ENV_SYNC_INTERVAL_SECS, ""),
            ]))
            .unwrap();
        assert_eq!(config.remote_url, "http://localhost:3000/posts");
        assert_eq!(config.fetch_limit, 3);
        assert_eq!(config.sync_interval_secs, DEFAULT_SYNC_INTERVAL_SECS);
    }

    #[test]
    fn overrides_reject_bad_values() {
        assert!(SyncConfig::default()
            .with_overrides(lookup(&[(ENV_FETCH_LIMIT, "many")]))
            .is_err());
        assert!(SyncConfig::default()
            .with_overrides(lookup(&[(ENV_FETCH_LIMIT, "0")]))
            .is_err());
        assert!(SyncConfig::default()
            .with_overrides(lookup(&[(ENV_REMOTE_URL, "ftp://example.com")]))
            .is_err());
    }

    #[test]
    fn load_from_path_merges_partial_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "sync_interval_secs": 120 }"#).unwrap();

        let config = SyncConfig::load_from_path(&path).unwrap();
        assert_eq!(config.sync_interval_secs, 120);
        assert_eq!(config.remote_url, DEFAULT_REMOTE_URL);
    }

    #[test]
    fn load_from_path_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "unexpected": true }"#).unwrap();

        let error = SyncConfig::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn load_from_missing_path_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::load_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, SyncConfig::default());
    }
}
