//! Startup Configuration
//!
//! Everything is read from the environment once, before the terminal is
//! taken over.

use std::path::PathBuf;

use trailview_core::SourceConfig;

/// Settings for one run of the browser
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Log source connection settings
    pub source: SourceConfig,
    /// Where tracing output goes (`TRAILVIEW_LOG`); `None` disables it
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_file: lookup("TRAILVIEW_LOG")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            source: SourceConfig::from_lookup(lookup),
        }
    }
}
