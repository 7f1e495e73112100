//! Layout Manager
//!
//! Splits the terminal between the list pane and the detail pane and keeps
//! the detail [`Viewport`] anchored below the list.
//!
//! # Screen layout
//!
//! ```text
//! ┌ title bar ──────────────┐  TITLE_ROWS
//! │ list pane               │  list_rows
//! │                         │  SEPARATOR_ROWS
//! ├ detail header ──────────┤  DETAIL_HEADER_ROWS
//! │ detail pane (viewport)  │  detail_rows
//! └ status / search line ───┘  STATUS_ROWS
//! ```
//!
//! `list_rows + detail_rows + CHROME_ROWS == height` once the first size is
//! known. Only the first size notification picks the 60/40 split; after that
//! the split belongs to the user (`+`/`-`) and later resizes only move the
//! bottom edge of the detail pane.

use crate::viewport::Viewport;

pub const TITLE_ROWS: usize = 3;
pub const SEPARATOR_ROWS: usize = 1;
pub const DETAIL_HEADER_ROWS: usize = 3;
pub const STATUS_ROWS: usize = 1;

/// Rows that belong to neither pane
pub const CHROME_ROWS: usize = TITLE_ROWS + SEPARATOR_ROWS + DETAIL_HEADER_ROWS + STATUS_ROWS;

/// Rows moved per manual resize
pub const RESIZE_STEP: usize = 5;
/// Shrinking never takes the detail pane below this
pub const MIN_DETAIL_ROWS: usize = 15;
/// Growing never takes the detail pane above this
pub const MAX_DETAIL_ROWS: usize = 50;
/// Growing requires at least this many list rows
pub const MIN_LIST_ROWS_FOR_GROW: usize = 15;

/// What a size notification changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// This was the first size notification
    pub first: bool,
    /// The formatter's output width changed
    pub width_changed: bool,
}

/// Owns terminal dimensions, the pane split and the detail viewport
#[derive(Debug, Default)]
pub struct LayoutManager {
    width: usize,
    height: usize,
    ready: bool,
    /// Preferred list height; the effective height may be smaller on a short terminal
    list_rows: usize,
    /// Grows minus shrinks since the height last changed
    net_grows: isize,
    viewport: Viewport,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a size notification has been received
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows available to the two panes together
    fn pane_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_ROWS)
    }

    /// Effective list pane height
    pub fn list_rows(&self) -> usize {
        self.list_rows.min(self.pane_rows())
    }

    /// Detail pane height (whatever the list does not use)
    pub fn detail_rows(&self) -> usize {
        self.pane_rows() - self.list_rows()
    }

    /// Screen row where the list pane starts
    pub fn list_y(&self) -> usize {
        TITLE_ROWS
    }

    /// Screen row of the detail header
    pub fn detail_header_y(&self) -> usize {
        TITLE_ROWS + self.list_rows() + SEPARATOR_ROWS
    }

    /// Screen row of the status line
    pub fn status_y(&self) -> usize {
        self.height.saturating_sub(STATUS_ROWS)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Handle a terminal size notification
    pub fn on_resize(&mut self, width: usize, height: usize) -> ResizeOutcome {
        let first = !self.ready;
        let width_changed = first || width != self.width;
        if height != self.height {
            self.net_grows = 0;
        }

        self.width = width;
        self.height = height;

        if first {
            // floor((height - chrome) * 0.6)
            self.list_rows = self.pane_rows() * 3 / 5;
            self.ready = true;
        }

        self.sync_viewport();

        ResizeOutcome {
            first,
            width_changed,
        }
    }

    /// Give the detail pane `RESIZE_STEP` more rows
    ///
    /// Refused past `MAX_DETAIL_ROWS` or when the list is shorter than
    /// `MIN_LIST_ROWS_FOR_GROW`, unless it undoes an earlier shrink.
    /// Returns `false` when refused.
    pub fn grow_detail_pane(&mut self) -> bool {
        let list = self.list_rows();
        let within_clamps =
            self.detail_rows() + RESIZE_STEP <= MAX_DETAIL_ROWS && list >= MIN_LIST_ROWS_FOR_GROW;
        let undoes_shrink = self.net_grows < 0 && list >= RESIZE_STEP;
        if !self.ready || !(within_clamps || undoes_shrink) {
            return false;
        }

        self.list_rows = list - RESIZE_STEP;
        self.net_grows += 1;
        self.sync_viewport();
        true
    }

    /// Give the list pane `RESIZE_STEP` more rows
    ///
    /// Refused below `MIN_DETAIL_ROWS`, unless it undoes an earlier grow.
    /// Returns `false` when refused.
    pub fn shrink_detail_pane(&mut self) -> bool {
        let detail = self.detail_rows();
        let within_clamps = detail >= MIN_DETAIL_ROWS + RESIZE_STEP;
        let undoes_grow = self.net_grows > 0 && detail >= RESIZE_STEP;
        if !self.ready || !(within_clamps || undoes_grow) {
            return false;
        }

        self.list_rows = self.list_rows() + RESIZE_STEP;
        self.net_grows -= 1;
        self.sync_viewport();
        true
    }

    /// Re-anchor the detail viewport under the list
    fn sync_viewport(&mut self) {
        let y = self.detail_header_y() + DETAIL_HEADER_ROWS;
        let rows = self.detail_rows();
        self.viewport.set_width(self.width);
        self.viewport.set_height(rows);
        self.viewport.set_y_position(y);
    }
}
