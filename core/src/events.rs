//! Input Events and Actions
//!
//! Events flow from the terminal surface into the [`Controller`]; actions
//! flow back out telling the surface which side effects to perform.
//!
//! The surface translates raw terminal events into [`InputEvent`]s and never
//! interprets keys itself. What a key means depends on the controller's
//! current [`InputMode`].
//!
//! [`Controller`]: crate::controller::Controller

use crate::entry::LogEntry;
use crate::search::{RequestId, SearchRequest};

/// A key press, already stripped of terminal-specific detail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Delete,
    Esc,
    /// Ctrl-U
    ClearLine,
    /// Ctrl-C; always quits regardless of mode
    Interrupt,
}

/// Events delivered to the controller, one at a time
#[derive(Clone, Debug)]
pub enum InputEvent {
    // ============================================
    // Terminal Events
    // ============================================
    /// Key press
    Key(Key),

    /// Terminal size changed (or first became known)
    Resize {
        /// Columns
        width: u16,
        /// Rows
        height: u16,
    },

    // ============================================
    // Fetch Events
    // ============================================
    /// A fetch finished; failures arrive here as an empty list
    SearchCompleted {
        /// Request this result answers
        id: RequestId,
        /// Entries returned by the source
        entries: Vec<LogEntry>,
    },
}

/// Side effect requested by the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do beyond redrawing
    None,
    /// Leave the event loop
    Quit,
    /// Start fetching for this request (superseding any in-flight fetch)
    Fetch(SearchRequest),
    /// Abort the in-flight fetch
    CancelFetch(RequestId),
}

/// Where key input is routed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive the list, panes and detail scroll
    Navigate,
    /// Keys edit the search query
    Search,
}
