//! Papertrail Source
//!
//! Log source backed by Papertrail's event search API.
//!
//! # Papertrail API
//!
//! `GET /api/v1/events/search.json?q=<query>&limit=<n>` with the API token in
//! the `X-Papertrail-Token` header. The body holds an `events` array; each
//! event's `message` is parsed by [`MessageParser`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::parse::{MessageParser, SearchResponse};
use super::traits::{LogSource, SourceError};
use crate::entry::LogEntry;

/// Default search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://papertrailapp.com/api/v1/events/search.json";

/// Default number of events per query
pub const DEFAULT_LIMIT: u32 = 100;

/// Default bound on a single fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API token
const TOKEN_HEADER: &str = "X-Papertrail-Token";

/// Papertrail connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    /// Search endpoint URL
    pub endpoint: String,
    /// API token; requests without one are sent anyway and fail upstream
    pub token: Option<String>,
    /// Events per query
    pub limit: u32,
    /// Bound on one fetch
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Create from environment variables
    ///
    /// - `PAPERTRAIL_KEY`: API token
    /// - `TRAILVIEW_ENDPOINT`: search endpoint override
    /// - `TRAILVIEW_LIMIT`: events per query
    /// - `TRAILVIEW_FETCH_TIMEOUT_SECS`: bound on one fetch
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: lookup("TRAILVIEW_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.endpoint),
            token: lookup("PAPERTRAIL_KEY").filter(|v| !v.is_empty()),
            limit: lookup("TRAILVIEW_LIMIT")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.limit),
            timeout: lookup("TRAILVIEW_FETCH_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n| n > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Papertrail search client
#[derive(Clone, Debug)]
pub struct PapertrailSource {
    config: SourceConfig,
    parser: MessageParser,
    http_client: reqwest::Client,
}

impl PapertrailSource {
    /// Create a new source
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            config,
            parser: MessageParser::new()?,
            http_client,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, SourceError> {
        Self::new(SourceConfig::from_env())
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Decode a response body into entries
    fn decode(&self, body: &str) -> Result<Vec<LogEntry>, SourceError> {
        let response: SearchResponse = serde_json::from_str(body)?;
        let entries = self.parser.parse_all(&response.events);

        tracing::debug!(
            events = response.events.len(),
            entries = entries.len(),
            "decoded search response"
        );

        Ok(entries)
    }
}

#[async_trait]
impl LogSource for PapertrailSource {
    fn name(&self) -> &str {
        "Papertrail"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<LogEntry>, SourceError> {
        let limit = self.config.limit.to_string();
        let mut request = self
            .http_client
            .get(&self.config.endpoint)
            .query(&[("q", query), ("limit", limit.as_str())]);

        if let Some(ref token) = self.config.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        self.decode(&body)
    }
}
