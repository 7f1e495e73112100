//! Application Controller
//!
//! Single-threaded dispatcher tying the browsing components together. The
//! surface feeds it one [`InputEvent`] at a time; each call runs to
//! completion before the next event is admitted, so no state here needs
//! locking.
//!
//! # Dispatch
//!
//! 1. Size changes go to the [`LayoutManager`]
//! 2. `Ctrl-C` quits in every mode
//! 3. Other keys are routed by [`InputMode`]: the query editor in search
//!    mode, navigation / pane / detail-scroll commands otherwise
//! 4. Finished fetches go through the [`SearchController`], which drops
//!    stale results before the list is replaced
//!
//! After every event the detail pane is reformatted if, and only if, the
//! entry under the cursor changed identity or the pane width changed.

use crate::browser::{EntryKey, ListBrowser};
use crate::events::{Action, InputEvent, InputMode, Key};
use crate::format::{FormatError, JsonFormatter, PayloadFormatter, StyledLine};
use crate::layout::LayoutManager;
use crate::search::{RequestId, SearchController, SearchRequest};
use crate::entry::LogEntry;

/// Shown in the detail pane when a payload cannot be formatted
pub const CANNOT_RENDER: &str = "Cannot render payload: not valid JSON";

/// What the detail pane currently holds
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailContent {
    /// No entry under the cursor
    Empty,
    /// Formatted payload of the current entry
    Formatted,
    /// The current entry's payload could not be formatted
    Unrenderable(FormatError),
}

/// Top-level state machine of the browser
pub struct Controller<F: PayloadFormatter = JsonFormatter> {
    browser: ListBrowser,
    layout: LayoutManager,
    search: SearchController,
    formatter: F,
    detail: DetailContent,
    /// Entry and width the detail pane was last formatted for
    detail_key: Option<EntryKey>,
    detail_width: usize,
    /// Number of times the detail pane was reformatted
    detail_revision: u64,
}

impl Controller<JsonFormatter> {
    pub fn new() -> Self {
        Self::with_formatter(JsonFormatter::new())
    }
}

impl Default for Controller<JsonFormatter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PayloadFormatter> Controller<F> {
    /// Create a controller using a custom payload formatter
    pub fn with_formatter(formatter: F) -> Self {
        Self {
            browser: ListBrowser::default(),
            layout: LayoutManager::new(),
            search: SearchController::new(),
            formatter,
            detail: DetailContent::Empty,
            detail_key: None,
            detail_width: 0,
            detail_revision: 0,
        }
    }

    // ============================================
    // Accessors
    // ============================================

    pub fn browser(&self) -> &ListBrowser {
        &self.browser
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn detail(&self) -> &DetailContent {
        &self.detail
    }

    pub fn detail_revision(&self) -> u64 {
        self.detail_revision
    }

    /// Where key input currently goes
    pub fn mode(&self) -> InputMode {
        if self.search.is_editing() {
            InputMode::Search
        } else {
            InputMode::Navigate
        }
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.search.pending().is_some()
    }

    // ============================================
    // Dispatch
    // ============================================

    /// Issue the startup fetch for the empty query
    pub fn initial_fetch(&mut self) -> SearchRequest {
        let request = self.search.request("");
        tracing::info!(id = %request.id, "initial fetch");
        request
    }

    /// Process one event to completion
    pub fn handle(&mut self, event: InputEvent) -> Action {
        let mut width_changed = false;

        let action = match event {
            InputEvent::Resize { width, height } => {
                let outcome = self.layout.on_resize(width as usize, height as usize);
                self.browser.set_list_rows(self.layout.list_rows());
                width_changed = outcome.width_changed;
                tracing::debug!(width, height, first = outcome.first, "resized");
                Action::None
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::SearchCompleted { id, entries } => {
                self.apply_result(id, entries);
                Action::None
            }
        };

        self.refresh_detail(width_changed);
        action
    }

    fn handle_key(&mut self, key: Key) -> Action {
        if key == Key::Interrupt {
            return Action::Quit;
        }

        match self.mode() {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Navigate => self.handle_navigate_key(key),
        }
    }

    /// Keys while editing the query; nothing here navigates
    fn handle_search_key(&mut self, key: Key) -> Action {
        match key {
            Key::Enter => {
                if let Some(request) = self.search.submit() {
                    tracing::info!(id = %request.id, query = %request.query, "search submitted");
                    return Action::Fetch(request);
                }
            }
            Key::Esc => self.search.cancel_editing(),
            Key::Char(c) => self.search.input_mut().insert(c),
            Key::Backspace => self.search.input_mut().backspace(),
            Key::Delete => self.search.input_mut().delete(),
            Key::Left => self.search.input_mut().move_left(),
            Key::Right => self.search.input_mut().move_right(),
            Key::Home => self.search.input_mut().move_home(),
            Key::End => self.search.input_mut().move_end(),
            Key::ClearLine => self.search.input_mut().clear(),
            Key::Up | Key::Down | Key::PageUp | Key::PageDown | Key::Interrupt => {}
        }
        Action::None
    }

    fn handle_navigate_key(&mut self, key: Key) -> Action {
        match key {
            // List navigation
            Key::Up => {
                self.browser.move_up();
            }
            Key::Down => {
                self.browser.move_down();
            }
            Key::Home | Key::Char('g') => {
                self.browser.move_to_first();
            }
            Key::End | Key::Char('G') => {
                self.browser.move_to_last();
            }
            Key::Enter | Key::Char(' ') => {
                if !self.browser.is_empty() {
                    let cursor = self.browser.cursor();
                    self.browser.toggle_select(cursor);
                }
            }

            // Detail pane scrolling
            Key::Char('j') => self.layout.viewport_mut().line_down(1),
            Key::Char('k') => self.layout.viewport_mut().line_up(1),
            Key::PageDown => self.layout.viewport_mut().half_page_down(),
            Key::PageUp => self.layout.viewport_mut().half_page_up(),

            // Pane split
            Key::Char('+') => {
                if self.layout.grow_detail_pane() {
                    self.browser.set_list_rows(self.layout.list_rows());
                }
            }
            Key::Char('-') => {
                if self.layout.shrink_detail_pane() {
                    self.browser.set_list_rows(self.layout.list_rows());
                }
            }

            // Search
            Key::Char('/') => self.search.start(),
            Key::Char('r') => {
                let query = self.search.active_query().unwrap_or_default().to_string();
                let request = self.search.request(query);
                tracing::info!(id = %request.id, query = %request.query, "refresh");
                return Action::Fetch(request);
            }
            Key::Esc => {
                if let Some(request) = self.search.cancel_pending() {
                    tracing::info!(id = %request.id, "fetch cancelled");
                    return Action::CancelFetch(request.id);
                }
            }

            Key::Char('q') => return Action::Quit,

            _ => {}
        }
        Action::None
    }

    /// Apply a finished fetch if it answers the latest request
    fn apply_result(&mut self, id: RequestId, entries: Vec<LogEntry>) {
        match self.search.complete(id, entries) {
            Some(entries) => {
                tracing::debug!(id = %id, count = entries.len(), "replacing entries");
                self.browser.replace_entries(entries);
            }
            None => tracing::warn!(id = %id, "discarding stale result"),
        }
    }

    // ============================================
    // Detail pane
    // ============================================

    /// Reformat the detail pane when the selected entry or width changed
    fn refresh_detail(&mut self, width_changed: bool) {
        let key = self.browser.current_key();
        let width = self.layout.width();

        if key == self.detail_key && !width_changed && width == self.detail_width {
            return;
        }

        self.detail_key = key;
        self.detail_width = width;
        self.detail_revision += 1;

        let (detail, lines) = match self.browser.current() {
            None => (DetailContent::Empty, Vec::new()),
            Some(entry) => match self.formatter.format(&entry.payload, width) {
                Ok(text) => (DetailContent::Formatted, text.lines),
                Err(e) => {
                    tracing::debug!("payload not renderable: {}", e);
                    (
                        DetailContent::Unrenderable(e),
                        vec![StyledLine::plain(CANNOT_RENDER)],
                    )
                }
            },
        };

        self.detail = detail;
        let viewport = self.layout.viewport_mut();
        viewport.set_content(lines);
        viewport.goto_top();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Severity;
    use crate::search::SearchPhase;

    fn entry(i: usize, payload: &str) -> LogEntry {
        LogEntry {
            env: "prod".to_string(),
            program: "api".to_string(),
            severity: Severity::Info,
            label: format!("label-{i}"),
            message: format!("message {i}"),
            payload: payload.to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n).map(|i| entry(i, &format!("{{\"i\":{i}}}"))).collect()
    }

    /// Controller with a 120x58 terminal (30 list rows) and `n` entries loaded
    fn loaded(n: usize) -> Controller {
        let mut c = Controller::new();
        c.handle(InputEvent::Resize {
            width: 120,
            height: 58,
        });
        let request = c.initial_fetch();
        c.handle(InputEvent::SearchCompleted {
            id: request.id,
            entries: entries(n),
        });
        c
    }

    fn key(c: &mut Controller, key: Key) -> Action {
        c.handle(InputEvent::Key(key))
    }

    fn type_str(c: &mut Controller, s: &str) {
        for ch in s.chars() {
            key(c, Key::Char(ch));
        }
    }

    fn detail_text(c: &Controller) -> String {
        c.layout()
            .viewport()
            .lines()
            .iter()
            .map(StyledLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_interrupt_quits_in_every_mode() {
        let mut c = loaded(3);
        assert_eq!(key(&mut c, Key::Interrupt), Action::Quit);

        key(&mut c, Key::Char('/'));
        assert_eq!(c.mode(), InputMode::Search);
        assert_eq!(key(&mut c, Key::Interrupt), Action::Quit);
    }

    #[test]
    fn test_q_quits_only_when_navigating() {
        let mut c = loaded(3);
        key(&mut c, Key::Char('/'));
        assert_eq!(key(&mut c, Key::Char('q')), Action::None);
        assert_eq!(c.search().input().value(), "q");

        key(&mut c, Key::Esc);
        assert_eq!(key(&mut c, Key::Char('q')), Action::Quit);
    }

    #[test]
    fn test_search_mode_swallows_navigation_keys() {
        let mut c = loaded(10);
        key(&mut c, Key::Char('/'));
        for k in [Key::Down, Key::Char('j'), Key::Char('+'), Key::Char(' '), Key::Char('-')] {
            key(&mut c, k);
        }
        assert_eq!(c.browser().cursor(), 0);
        assert_eq!(c.browser().selected().count(), 0);
        assert_eq!(c.search().input().value(), "j+ -");
    }

    #[test]
    fn test_submit_issues_fetch_and_returns_to_navigation() {
        let mut c = loaded(3);
        key(&mut c, Key::Char('/'));
        type_str(&mut c, "severity:error");

        let Action::Fetch(request) = key(&mut c, Key::Enter) else {
            panic!("expected fetch");
        };
        assert_eq!(request.query, "severity:error");
        assert_eq!(c.mode(), InputMode::Navigate);
        assert_eq!(c.search().phase(), SearchPhase::Submitting);
        assert!(c.is_loading());
        assert!(c.search().input().is_empty());
    }

    #[test]
    fn test_detail_follows_cursor() {
        let mut c = loaded(5);
        assert_eq!(c.detail(), &DetailContent::Formatted);
        assert!(detail_text(&c).contains("\"i\": 0"));

        key(&mut c, Key::Down);
        assert!(detail_text(&c).contains("\"i\": 1"));
    }

    #[test]
    fn test_detail_not_reformatted_without_change() {
        let mut c = loaded(5);
        let revision = c.detail_revision();

        // At the top already: no move, no reformat
        key(&mut c, Key::Up);
        key(&mut c, Key::Char('j'));
        key(&mut c, Key::Char('/'));
        key(&mut c, Key::Esc);
        c.handle(InputEvent::Resize {
            width: 120,
            height: 70,
        });
        assert_eq!(c.detail_revision(), revision);

        // Width change does reformat
        c.handle(InputEvent::Resize {
            width: 90,
            height: 70,
        });
        assert_eq!(c.detail_revision(), revision + 1);
    }

    #[test]
    fn test_detail_scroll_keys_leave_cursor_alone() {
        let mut c = Controller::new();
        c.handle(InputEvent::Resize {
            width: 120,
            height: 40,
        });
        let request = c.initial_fetch();
        let big = format!(
            "{{{}}}",
            (0..40)
                .map(|i| format!("\"k{i}\":{i}"))
                .collect::<Vec<_>>()
                .join(",")
        );
        c.handle(InputEvent::SearchCompleted {
            id: request.id,
            entries: vec![entry(0, &big), entry(1, "{}")],
        });

        key(&mut c, Key::Char('j'));
        key(&mut c, Key::Char('j'));
        assert_eq!(c.layout().viewport().y_offset(), 2);
        assert_eq!(c.browser().cursor(), 0);

        key(&mut c, Key::Char('k'));
        assert_eq!(c.layout().viewport().y_offset(), 1);

        // Moving to another entry scrolls the detail pane back to the top
        key(&mut c, Key::Down);
        key(&mut c, Key::Up);
        assert_eq!(c.layout().viewport().y_offset(), 0);
    }

    #[test]
    fn test_malformed_payload_shows_placeholder() {
        let mut c = Controller::new();
        c.handle(InputEvent::Resize {
            width: 100,
            height: 40,
        });
        let request = c.initial_fetch();
        c.handle(InputEvent::SearchCompleted {
            id: request.id,
            entries: vec![entry(0, "not-json"), entry(1, "")],
        });

        assert!(matches!(c.detail(), DetailContent::Unrenderable(FormatError::Invalid(_))));
        assert_eq!(detail_text(&c), CANNOT_RENDER);

        key(&mut c, Key::Down);
        assert_eq!(c.detail(), &DetailContent::Unrenderable(FormatError::Empty));
        assert_eq!(detail_text(&c), CANNOT_RENDER);
    }

    #[test]
    fn test_empty_result_is_neutral() {
        let mut c = loaded(0);
        assert_eq!(c.detail(), &DetailContent::Empty);
        assert!(c.layout().viewport().lines().is_empty());
        assert_eq!(key(&mut c, Key::Down), Action::None);
        assert_eq!(key(&mut c, Key::Enter), Action::None);
        assert_eq!(c.browser().selected().count(), 0);
    }

    #[test]
    fn test_toggle_selection() {
        let mut c = loaded(4);
        key(&mut c, Key::Down);
        key(&mut c, Key::Char(' '));
        key(&mut c, Key::Down);
        key(&mut c, Key::Enter);
        assert_eq!(c.browser().selected().collect::<Vec<_>>(), vec![1, 2]);
        key(&mut c, Key::Enter);
        assert_eq!(c.browser().selected().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_pane_resize_keys_keep_cursor_visible() {
        let mut c = loaded(100);
        for _ in 0..29 {
            key(&mut c, Key::Down);
        }
        assert_eq!(c.browser().window_offset(), 0);

        key(&mut c, Key::Char('+'));
        assert_eq!(c.layout().list_rows(), 25);
        assert_eq!(c.browser().list_rows(), 25);
        assert_eq!(c.browser().window_offset(), 5);

        key(&mut c, Key::Char('-'));
        assert_eq!(c.browser().list_rows(), 30);
        assert_eq!(c.browser().window_offset(), 5);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut c = loaded(2);
        key(&mut c, Key::Char('/'));
        type_str(&mut c, "a");
        let Action::Fetch(a) = key(&mut c, Key::Enter) else {
            panic!("expected fetch");
        };
        key(&mut c, Key::Char('/'));
        type_str(&mut c, "b");
        let Action::Fetch(b) = key(&mut c, Key::Enter) else {
            panic!("expected fetch");
        };

        c.handle(InputEvent::SearchCompleted {
            id: b.id,
            entries: entries(7),
        });
        c.handle(InputEvent::SearchCompleted {
            id: a.id,
            entries: entries(3),
        });
        assert_eq!(c.browser().len(), 7);
        assert_eq!(c.search().active_query(), Some("b"));
    }

    #[test]
    fn test_escape_cancels_in_flight_fetch() {
        let mut c = loaded(2);
        let Action::Fetch(request) = key(&mut c, Key::Char('r')) else {
            panic!("expected fetch");
        };
        assert_eq!(key(&mut c, Key::Esc), Action::CancelFetch(request.id));
        assert!(!c.is_loading());

        c.handle(InputEvent::SearchCompleted {
            id: request.id,
            entries: entries(9),
        });
        assert_eq!(c.browser().len(), 2);

        // Nothing left to cancel
        assert_eq!(key(&mut c, Key::Esc), Action::None);
    }

    #[test]
    fn test_refresh_reuses_active_query() {
        let mut c = loaded(1);
        key(&mut c, Key::Char('/'));
        type_str(&mut c, "program:api");
        let Action::Fetch(request) = key(&mut c, Key::Enter) else {
            panic!("expected fetch");
        };
        c.handle(InputEvent::SearchCompleted {
            id: request.id,
            entries: entries(1),
        });

        let Action::Fetch(refresh) = key(&mut c, Key::Char('r')) else {
            panic!("expected fetch");
        };
        assert_eq!(refresh.query, "program:api");
    }
}
