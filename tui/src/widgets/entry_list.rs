//! EntryList Widget
//!
//! Draws the browser's visible window, one entry per row:
//!
//! ```text
//! ==> * 2024-3-9 08:15 [production] -  error  (worker) ~job failed
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use trailview_core::{ListBrowser, LogEntry};

use crate::theme;

const CURSOR_MARKER: &str = "==> ";
const SELECTED_MARKER: &str = "* ";

/// The list pane
pub struct EntryList<'a> {
    browser: &'a ListBrowser,
}

impl<'a> EntryList<'a> {
    pub fn new(browser: &'a ListBrowser) -> Self {
        Self { browser }
    }
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let offset = self.browser.window_offset();
        let cursor = self.browser.cursor();

        for (i, entry) in self
            .browser
            .visible_slice()
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            let index = offset + i;
            let y = area.y + i as u16;
            render_row(
                buf,
                Rect::new(area.x, y, area.width, 1),
                entry,
                index == cursor,
                self.browser.is_selected(index),
            );
        }
    }
}

fn render_row(buf: &mut Buffer, row: Rect, entry: &LogEntry, is_cursor: bool, is_selected: bool) {
    let highlight = if is_cursor {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let cursor_marker = if is_cursor { CURSOR_MARKER } else { "    " };
    let selected_marker = if is_selected { SELECTED_MARKER } else { "  " };

    let parts = [
        (cursor_marker.to_string(), Style::default().fg(theme::CURSOR)),
        (selected_marker.to_string(), Style::default().fg(theme::SELECTED)),
        (format!("{} ", entry.display_date()), highlight),
        (format!("[{}]", entry.env), Style::default().fg(theme::ENV)),
        (" - ".to_string(), highlight),
        (
            format!(" {} ", entry.severity),
            theme::severity_style(&entry.severity),
        ),
        (format!(" ({}) ~{}", entry.label, entry.message), highlight),
    ];

    let right = row.x + row.width;
    let mut x = row.x;
    for (text, style) in &parts {
        if x >= right {
            break;
        }
        let (next_x, _) = buf.set_stringn(x, row.y, text, (right - x) as usize, *style);
        x = next_x;
    }
}
