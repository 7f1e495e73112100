//! Search Controller
//!
//! Captures a query in an editing mode and issues fetch requests.
//!
//! ```text
//!            start()                submit()
//!   Idle ─────────────▶ Editing ─────────────▶ Submitting
//!    ▲                    │  ▲                     │
//!    │   cancel_editing() │  │ start()             │ complete(latest id)
//!    └────────────────────┘  └─────────────────────┤
//!    ▲                                             │
//!    └─────────────────────────────────────────────┘
//! ```
//!
//! Every submission gets a fresh [`RequestId`]. Only the result for the most
//! recently issued id is accepted; anything older is stale and dropped, so
//! the last search always wins no matter the order results come back in.

use std::fmt;

use crate::entry::LogEntry;

/// Identifier of one fetch request
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the surface should perform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: RequestId,
    pub query: String,
}

/// Search mode as seen by the dispatcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search activity
    Idle,
    /// Keys edit the query buffer
    Editing,
    /// A fetch is in flight; keys navigate
    Submitting,
}

/// Single-line text input for the query
#[derive(Clone, Debug, Default)]
pub struct QueryInput {
    value: Vec<char>,
    /// Cursor position in chars
    position: usize,
}

impl QueryInput {
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.position, c);
        self.position += 1;
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.value.remove(self.position);
        }
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self) {
        if self.position < self.value.len() {
            self.value.remove(self.position);
        }
    }

    pub fn move_left(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.position = (self.position + 1).min(self.value.len());
    }

    pub fn move_home(&mut self) {
        self.position = 0;
    }

    pub fn move_end(&mut self) {
        self.position = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.position = 0;
    }

    /// Take the current value, leaving the input empty
    pub fn take(&mut self) -> String {
        let value = self.value();
        self.clear();
        value
    }
}

/// Query capture and request bookkeeping
#[derive(Debug, Default)]
pub struct SearchController {
    editing: bool,
    input: QueryInput,
    next_id: u64,
    /// Latest issued request that has not completed yet
    pending: Option<SearchRequest>,
    /// Query of the result set currently shown
    active_query: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        if self.editing {
            SearchPhase::Editing
        } else if self.pending.is_some() {
            SearchPhase::Submitting
        } else {
            SearchPhase::Idle
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut QueryInput {
        &mut self.input
    }

    /// Request currently in flight, if any
    pub fn pending(&self) -> Option<&SearchRequest> {
        self.pending.as_ref()
    }

    /// Query whose results are on screen
    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    /// Enter editing with an empty, focused buffer
    pub fn start(&mut self) {
        self.input.clear();
        self.editing = true;
    }

    /// Leave editing without searching
    pub fn cancel_editing(&mut self) {
        self.input.clear();
        self.editing = false;
    }

    /// Confirm the buffer and issue a request for it
    ///
    /// Returns `None` when not editing.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        if !self.editing {
            return None;
        }
        self.editing = false;
        let query = self.input.take();
        Some(self.issue(query))
    }

    /// Issue a request without going through the editor (startup fetch)
    pub fn request(&mut self, query: impl Into<String>) -> SearchRequest {
        self.issue(query.into())
    }

    fn issue(&mut self, query: String) -> SearchRequest {
        let request = SearchRequest {
            id: RequestId(self.next_id),
            query,
        };
        self.next_id += 1;
        self.pending = Some(request.clone());
        request
    }

    /// Abandon the in-flight request; its result will be discarded
    pub fn cancel_pending(&mut self) -> Option<SearchRequest> {
        self.pending.take()
    }

    /// Whether a result for `id` would be accepted
    pub fn is_current(&self, id: RequestId) -> bool {
        self.pending.as_ref().is_some_and(|p| p.id == id)
    }

    /// Accept a finished fetch
    ///
    /// Returns the entries to show when `id` is the latest request, `None`
    /// when the result is stale or was cancelled.
    pub fn complete(&mut self, id: RequestId, entries: Vec<LogEntry>) -> Option<Vec<LogEntry>> {
        if !self.is_current(id) {
            return None;
        }
        self.active_query = self.pending.take().map(|p| p.query);
        Some(entries)
    }
}
