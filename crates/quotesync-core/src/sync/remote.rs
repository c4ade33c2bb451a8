//! Read-only remote quote source.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::SyncConfig;
use crate::models::{Origin, Quote, QuoteId};
use crate::util::{compact_text, unix_millis_now};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Malformed remote data: {0}")]
    Malformed(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Source of externally assigned quotes.
///
/// Implementations return a bounded, already normalized window; any failure
/// aborts the sync pass that called them.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_remote_quotes(&self) -> RemoteResult<Vec<Quote>>;
}

/// Post shape served by the mock endpoint.
#[derive(Debug, Deserialize)]
struct RemotePost {
    id: u64,
    #[serde(rename = "userId")]
    user_id: u64,
    title: String,
}

/// HTTP-backed [`RemoteSource`].
#[derive(Clone)]
pub struct HttpRemoteSource {
    endpoint: String,
    fetch_limit: usize,
    client: reqwest::Client,
}

impl HttpRemoteSource {
    pub fn new(config: &SyncConfig) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            endpoint: config.remote_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit,
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_remote_quotes(&self) -> RemoteResult<Vec<Quote>> {
        tracing::debug!("Fetching remote quotes from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: parse_api_error(status, &body),
            });
        }

        let body = response.text().await?;
        normalize_posts(&body, self.fetch_limit, unix_millis_now())
    }
}

/// Turn a raw JSON payload into at most `limit` remote quotes stamped `now`.
///
/// The whole payload is rejected when it is not an array of posts, when a
/// title in the window is blank, or when the window repeats an id.
pub fn normalize_posts(payload: &str, limit: usize, now: i64) -> RemoteResult<Vec<Quote>> {
    let posts: Vec<RemotePost> = serde_json::from_str(payload)
        .map_err(|error| RemoteError::Malformed(format!("unexpected payload shape: {error}")))?;

    let mut seen = HashSet::new();
    posts
        .into_iter()
        .take(limit)
        .map(|post| {
            if !seen.insert(post.id) {
                return Err(RemoteError::Malformed(format!(
                    "duplicate post id {}",
                    post.id
                )));
            }
            let text = post.title.trim();
            if text.is_empty() {
                return Err(RemoteError::Malformed(format!(
                    "post {} has an empty title",
                    post.id
                )));
            }
            Ok(Quote {
                id: QuoteId::Remote(post.id),
                text: text.to_string(),
                author: format!("Server User {}", post.user_id),
                updated_at: now,
                origin: Origin::Remote,
            })
        })
        .collect()
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAYLOAD: &str = r#"[
        {"userId": 1, "id": 1, "title": "  sunt aut facere  ", "body": "ignored"},
        {"userId": 1, "id": 2, "title": "qui est esse", "body": "ignored"},
        {"userId": 2, "id": 11, "title": "et ea vero", "body": "ignored"}
    ]"#;

    #[test]
    fn normalize_posts_maps_shape() {
        let quotes = normalize_posts(PAYLOAD, 8, 1234).unwrap();
        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes[0],
            Quote {
                id: QuoteId::Remote(1),
                text: "sunt aut facere".to_string(),
                author: "Server User 1".to_string(),
                updated_at: 1234,
                origin: Origin::Remote,
            }
        );
        assert_eq!(quotes[2].author, "Server User 2");
    }

    #[test]
    fn normalize_posts_respects_limit() {
        let quotes = normalize_posts(PAYLOAD, 2, 0).unwrap();
        let ids = quotes.into_iter().map(|quote| quote.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![QuoteId::Remote(1), QuoteId::Remote(2)]);
    }

    #[test]
    fn normalize_posts_rejects_unexpected_shape() {
        assert!(matches!(
            normalize_posts(r#"{"posts": []}"#, 8, 0),
            Err(RemoteError::Malformed(_))
        ));
        assert!(matches!(
            normalize_posts(r#"[{"id": "one", "userId": 1, "title": "x"}]"#, 8, 0),
            Err(RemoteError::Malformed(_))
        ));
    }

    #[test]
    fn normalize_posts_rejects_blank_title() {
        let payload = r#"[{"id": 1, "userId": 1, "title": "   "}]"#;
        assert!(matches!(
            normalize_posts(payload, 8, 0),
            Err(RemoteError::Malformed(_))
        ));
    }

    #[test]
    fn normalize_posts_rejects_duplicate_ids() {
        let payload = r#"[{"id": 1, "userId": 1, "title": "a"}, {"id": 1, "userId": 2, "title": "b"}]"#;
        assert!(matches!(
            normalize_posts(payload, 8, 0),
            Err(RemoteError::Malformed(_))
        ));
    }

    #[test]
    fn malformed_items_beyond_window_are_ignored() {
        let payload = r#"[{"id": 1, "userId": 1, "title": "a"}, {"id": 2, "userId": 1, "title": ""}]"#;
        assert_eq!(normalize_posts(payload, 1, 0).unwrap().len(), 1);
    }

    #[test]
    fn parse_api_error_falls_back_to_status() {
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, "  "), "HTTP 502");
        assert_eq!(parse_api_error(StatusCode::NOT_FOUND, "gone"), "gone");
    }

    #[test]
    fn http_source_trims_trailing_slash() {
        let config = SyncConfig {
            remote_url: "https://example.com/posts/".to_string(),
            ..SyncConfig::default()
        };
        let source = HttpRemoteSource::new(&config).unwrap();
        assert_eq!(source.endpoint(), "https://example.com/posts");
    }
}
