//! Log Source Integration
//!
//! Abstracted access to log backends through the [`LogSource`] trait.
//!
//! # Available Sources
//!
//! - **Papertrail**: event search API (default)
//!
//! # Degraded fetches
//!
//! The browser never shows a fetch error as such. [`fetch_or_empty`] is the
//! boundary where transport faults, bad statuses, undecodable bodies and
//! timeouts all become an empty result set.

mod papertrail;
pub mod parse;
mod traits;

use std::time::Duration;

pub use papertrail::{
    PapertrailSource, SourceConfig, DEFAULT_ENDPOINT, DEFAULT_LIMIT, DEFAULT_TIMEOUT,
};
pub use traits::{LogSource, SourceError};

use crate::entry::LogEntry;

/// Fetch `query` with a bounded wait, degrading every failure to no entries
pub async fn fetch_or_empty(source: &dyn LogSource, query: &str, timeout: Duration) -> Vec<LogEntry> {
    let result = match tokio::time::timeout(timeout, source.fetch(query)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(timeout)),
    };

    match result {
        Ok(entries) => {
            tracing::info!(
                source = source.name(),
                query,
                count = entries.len(),
                "fetch complete"
            );
            entries
        }
        Err(e) => {
            tracing::warn!(source = source.name(), query, "fetch failed: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl LogSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _query: &str) -> Result<Vec<LogEntry>, SourceError> {
            Err(SourceError::Status { status: 401 })
        }
    }

    struct StalledSource;

    #[async_trait]
    impl LogSource for StalledSource {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn fetch(&self, _query: &str) -> Result<Vec<LogEntry>, SourceError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        let entries = fetch_or_empty(&FailingSource, "", Duration::from_secs(1)).await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_empty() {
        let entries = fetch_or_empty(&StalledSource, "q", Duration::from_millis(20)).await;
        assert!(entries.is_empty());
    }
}
