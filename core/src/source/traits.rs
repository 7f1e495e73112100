//! Log Source Traits
//!
//! A log source answers a query with an ordered list of entries. The browser
//! only depends on this trait, so tests and alternative backends can stand in
//! for the Papertrail client.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::entry::LogEntry;

/// Why a fetch produced no data
///
/// "No matches" is not an error; it is `Ok(vec![])`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Message patterns failed to compile
    #[error("invalid message pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Connection, TLS or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("search returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No answer within the configured bound
    #[error("search timed out after {0:?}")]
    Timeout(Duration),
}

/// Log Source trait
///
/// Implement this trait to browse a different log backend.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Backend name for logs and the title bar (e.g. "Papertrail")
    fn name(&self) -> &str;

    /// Fetch entries matching `query`; an empty query means "latest events"
    async fn fetch(&self, query: &str) -> Result<Vec<LogEntry>, SourceError>;
}
