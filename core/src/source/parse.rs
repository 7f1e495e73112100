//! Event Message Parsing
//!
//! Papertrail delivers each event as one free-form message line. Services
//! that feed this viewer log in the shape
//!
//! ```text
//! <severity> [<env>]-(<label>):<message>{ ... loggedObject: '<json>' ... }
//! ```
//!
//! Events that do not follow it are skipped. Events that follow it but carry
//! no `loggedObject` get a placeholder payload so the detail pane still shows
//! something structured.

use regex::Regex;
use serde::Deserialize;

use crate::entry::{LogEntry, Severity};

/// Payload used when an event has no `loggedObject`
pub const MISSING_PAYLOAD: &str = r#"{"error": "Could not parse JSON"}"#;

const META_PATTERN: &str = r"(\w*?) \[(.*?)\]-\((.*?)\):(.*?)\{";
const PAYLOAD_PATTERN: &str = r"loggedObject: '(.*?)'";

/// One event as returned by the search API
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub severity: String,
}

/// Search API response body
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// Extracts [`LogEntry`] fields from raw event messages
#[derive(Clone, Debug)]
pub struct MessageParser {
    meta: Regex,
    payload: Regex,
}

impl MessageParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            meta: Regex::new(META_PATTERN)?,
            payload: Regex::new(PAYLOAD_PATTERN)?,
        })
    }

    /// Parse one event, or `None` if its message is not in the expected shape
    pub fn parse(&self, event: &RawEvent) -> Option<LogEntry> {
        let meta = self.meta.captures(&event.message)?;

        let payload = self
            .payload
            .captures(&event.message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| MISSING_PAYLOAD.to_string());

        Some(LogEntry {
            env: meta[2].to_string(),
            program: event.program.clone(),
            severity: Severity::parse(&meta[1]),
            label: meta[3].to_string(),
            message: meta[4].to_string(),
            payload,
            timestamp: event.generated_at.clone(),
        })
    }

    /// Parse every event, dropping the ones that do not match
    pub fn parse_all(&self, events: &[RawEvent]) -> Vec<LogEntry> {
        events.iter().filter_map(|e| self.parse(e)).collect()
    }
}
