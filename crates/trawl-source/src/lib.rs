//! # trawl-source
//!
//! HTTP client for the identity platform's paginated log query API.
//!
//! [`LogClient::fetch_page`] is the cursor tracker: given a [`Cursor`] it
//! decides the query mode (start marker → `from`/`take` against the fixed
//! endpoint, continuation → the URL verbatim), decodes the page body and
//! extracts the next cursor from the `Link` header. It holds no mutable
//! state between calls.
//!
//! [`LogClient::first_log_id`] is the one-shot lookup of the first log id
//! inside a date window.

mod error;
mod first_log;
mod http;
pub mod link;
mod pages;

pub use error::SourceError;
pub use pages::page_from_parts;

use std::time::Duration;

use reqwest::Url;
use reqwest::header::ACCEPT;
use trawl_core::{Cursor, LogEntry};

// ── Types ──────────────────────────────────────────────────────────

/// One batch of log records plus the cursor for the batch after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Entries in the order the API returned them (oldest first).
    pub entries: Vec<LogEntry>,
    /// Continuation cursor, `None` once the stream is exhausted.
    pub next: Option<Cursor>,
}

impl Page {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client with the trawl user agent and a per-request timeout.
///
/// Shared with the token fetch so both calls reuse one connection pool.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the client cannot be built.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("trawl/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?)
}

/// HTTP client for the log query API, bound to one endpoint and one token.
pub struct LogClient {
    http: reqwest::Client,
    logs_endpoint: Url,
    token: String,
}

impl LogClient {
    /// Create a client with its own connection pool and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if `logs_endpoint` is not a URL,
    /// or [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(
        logs_endpoint: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        Self::with_http(http_client(timeout)?, logs_endpoint, token)
    }

    /// Create a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if `logs_endpoint` is not a URL.
    pub fn with_http(
        http: reqwest::Client,
        logs_endpoint: &str,
        token: impl Into<String>,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            http,
            logs_endpoint: parse_url(logs_endpoint)?,
            token: token.into(),
        })
    }

    /// The fixed log query endpoint.
    #[must_use]
    pub const fn logs_endpoint(&self) -> &Url {
        &self.logs_endpoint
    }

    /// GET with the bearer token and JSON accept header every call needs.
    fn authorized_get(&self, url: Url) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
    }
}

fn parse_url(raw: &str) -> Result<Url, SourceError> {
    Url::parse(raw).map_err(|e| SourceError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
