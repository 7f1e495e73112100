//! Trailview Core - Headless Log Browsing Engine
//!
//! This crate holds everything the log browser does apart from drawing:
//! fetching and parsing events, cursor and window bookkeeping, the pane
//! split, payload formatting and the search workflow. The terminal surface
//! feeds it [`InputEvent`]s and performs the [`Action`]s it returns.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Terminal Surface (tui)                   │
//! │      keys / resize / fetch results        draw from state    │
//! └──────────────┬──────────────────────────────────▲────────────┘
//!                │ InputEvent                       │
//! ┌──────────────▼──────────────────────────────────┴────────────┐
//! │                         Controller                           │
//! │  ┌─────────────┐  ┌───────────────┐  ┌────────────────────┐  │
//! │  │ ListBrowser │  │ LayoutManager │  │  SearchController  │  │
//! │  │  (cursor)   │  │  (+ Viewport) │  │ (query, requests)  │  │
//! │  └─────────────┘  └───────────────┘  └────────────────────┘  │
//! │                   PayloadFormatter                           │
//! └──────────────┬───────────────────────────────────────────────┘
//!                │ Action::Fetch
//! ┌──────────────▼───────────────────────────────────────────────┐
//! │              LogSource (PapertrailSource)                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`entry`]: Log entries and severities
//! - [`browser`]: Cursor, visible window and selection over the result set
//! - [`viewport`]: Scrollable text window behind the detail pane
//! - [`format`]: Pretty-printing payloads into styled lines
//! - [`layout`]: Terminal size and the list/detail split
//! - [`search`]: Query editing and request bookkeeping
//! - [`events`]: Input events, key codes and actions
//! - [`controller`]: The dispatcher tying it all together
//! - [`source`]: Log backends (Papertrail)
//!
//! # No TUI Dependencies
//!
//! Nothing here depends on ratatui or crossterm. The controller can be
//! driven from tests with synthetic events.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod controller;
pub mod entry;
pub mod events;
pub mod format;
pub mod layout;
pub mod search;
pub mod source;
pub mod viewport;

// Re-exports for convenience
pub use browser::{EntryKey, ListBrowser};
pub use controller::{Controller, DetailContent, CANNOT_RENDER};
pub use entry::{LogEntry, Severity};
pub use events::{Action, InputEvent, InputMode, Key};
pub use format::{
    FormatError, FormattedText, JsonFormatter, PayloadFormatter, Segment, StyledLine, TokenKind,
};
pub use layout::{LayoutManager, ResizeOutcome, CHROME_ROWS};
pub use search::{QueryInput, RequestId, SearchController, SearchPhase, SearchRequest};
pub use source::{fetch_or_empty, LogSource, PapertrailSource, SourceConfig, SourceError};
pub use viewport::Viewport;
