//! List Browser
//!
//! Windowed, cursor-navigable view over the current result set.
//!
//! # Invariants
//!
//! With a non-empty entry list and `list_rows > 0`:
//! - `cursor < entries.len()`
//! - `window_offset <= cursor < window_offset + list_rows`
//!
//! The window only ever moves by the amount needed to keep the cursor
//! inside it, so the list never jumps while navigating. Growing the pane
//! while the window sits at the tail pulls it back so the rows stay full.

use std::collections::BTreeSet;

use crate::entry::LogEntry;

/// Identity of the entry under the cursor
///
/// Two keys compare equal only when they point at the same row of the same
/// result set, which is what the detail pane needs to decide whether its
/// content is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryKey {
    pub generation: u64,
    pub index: usize,
}

/// Cursor and window state over a list of log entries
#[derive(Debug)]
pub struct ListBrowser {
    entries: Vec<LogEntry>,
    cursor: usize,
    window_offset: usize,
    list_rows: usize,
    selected: BTreeSet<usize>,
    /// Bumped on every replacement of `entries`
    generation: u64,
}

impl ListBrowser {
    /// Create an empty browser showing `list_rows` rows
    pub fn new(list_rows: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            window_offset: 0,
            list_rows,
            selected: BTreeSet::new(),
            generation: 0,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn window_offset(&self) -> usize {
        self.window_offset
    }

    pub fn list_rows(&self) -> usize {
        self.list_rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Entry under the cursor, if any
    pub fn current(&self) -> Option<&LogEntry> {
        self.entries.get(self.cursor)
    }

    /// Identity of the entry under the cursor, if any
    pub fn current_key(&self) -> Option<EntryKey> {
        self.current().map(|_| EntryKey {
            generation: self.generation,
            index: self.cursor,
        })
    }

    /// Move the cursor up one entry
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        if self.cursor == self.window_offset {
            self.window_offset -= 1;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor down one entry
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_down(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }

        self.cursor += 1;
        if self.cursor - self.window_offset >= self.list_rows.max(1) {
            self.window_offset += 1;
        }
        true
    }

    /// Jump to the first entry
    pub fn move_to_first(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = 0;
        self.window_offset = 0;
        true
    }

    /// Jump to the last entry, scrolling the window just far enough to show it
    pub fn move_to_last(&mut self) -> bool {
        let Some(last) = self.entries.len().checked_sub(1) else {
            return false;
        };
        if self.cursor == last {
            return false;
        }
        self.cursor = last;
        self.clamp_window();
        true
    }

    /// Flip the selection mark on `index`
    ///
    /// Indices past the end of the list are ignored.
    pub fn toggle_select(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indices in ascending order
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Selected entries in list order
    pub fn selected_entries(&self) -> Vec<&LogEntry> {
        self.selected
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .collect()
    }

    /// Entries currently inside the window, clipped to the end of the list
    pub fn visible_slice(&self) -> &[LogEntry] {
        let start = self.window_offset.min(self.entries.len());
        let end = (self.window_offset + self.list_rows).min(self.entries.len());
        &self.entries[start..end]
    }

    /// Replace the whole result set, resetting cursor, window and selection
    pub fn replace_entries(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries;
        self.cursor = 0;
        self.window_offset = 0;
        self.selected.clear();
        self.generation += 1;
    }

    /// Change the number of visible rows, keeping the cursor in view
    pub fn set_list_rows(&mut self, rows: usize) {
        self.list_rows = rows;
        self.clamp_window();
        self.window_offset = self
            .window_offset
            .min(self.entries.len().saturating_sub(rows));
    }

    /// Shift the window by the minimum amount that brings the cursor back into view
    fn clamp_window(&mut self) {
        if self.cursor < self.window_offset {
            self.window_offset = self.cursor;
        } else if self.list_rows > 0 && self.cursor - self.window_offset >= self.list_rows {
            self.window_offset = self.cursor + 1 - self.list_rows;
        }
    }
}

impl Default for ListBrowser {
    fn default() -> Self {
        Self::new(0)
    }
}
