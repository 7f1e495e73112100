//! Log Entries
//!
//! The immutable record the browser displays. Entries are produced by a
//! [`LogSource`](crate::source::LogSource) and never mutated afterwards.

use std::fmt;

use chrono::DateTime;

/// Date format used in list rows (`2024-3-7 09:15`)
const ROW_DATE_FORMAT: &str = "%Y-%-m-%-d %H:%M";

/// Severity of a log entry
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    /// Anything the source reported that is not one of the above
    Other(String),
}

impl Severity {
    /// Parse a severity tag (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            "info" => Severity::Info,
            _ => Severity::Other(s.trim().to_string()),
        }
    }

    /// Tag as shown in list rows
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Other(s) => s,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Environment tag (e.g. `production`)
    pub env: String,
    /// Program that emitted the event
    pub program: String,
    pub severity: Severity,
    /// Short label identifying the emitting component
    pub label: String,
    /// Free-text message
    pub message: String,
    /// Raw structured payload; may be empty or malformed
    pub payload: String,
    /// RFC 3339 timestamp as delivered by the source
    pub timestamp: String,
}

impl LogEntry {
    /// Timestamp formatted for list rows, or the raw string if it does not parse
    pub fn display_date(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.timestamp) {
            Ok(dt) => dt.format(ROW_DATE_FORMAT).to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }

    /// Uncolored single-line summary
    ///
    /// The layout matches the styled row the terminal surface draws, so the
    /// two can be measured interchangeably.
    pub fn summary(&self) -> String {
        format!(
            "{} [{}] -  {}  ({}) ~{}",
            self.display_date(),
            self.env,
            self.severity,
            self.label,
            self.message
        )
    }
}
