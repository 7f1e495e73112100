//! Chrome Widgets
//!
//! Fixed furniture around the two panes: boxed headers, the separator and
//! the bottom status / search line.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use trailview_core::{InputMode, QueryInput};

use crate::theme;

/// Braille spinner shown while a fetch is in flight
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const NAVIGATE_HINTS: &str =
    "↑/↓ move · j/k scroll · +/- resize · space mark · / search · r refresh · q quit";

/// A three-row box with a title on the left and a note on the right
pub struct BoxHeader<'a> {
    title: &'a str,
    note: &'a str,
}

impl<'a> BoxHeader<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title, note: "" }
    }

    pub fn note(mut self, note: &'a str) -> Self {
        self.note = note;
        self
    }
}

impl Widget for BoxHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 3 {
            return;
        }

        let border = Style::default().fg(theme::BORDER);
        let inner = (area.width - 2) as usize;
        let horizontal = "─".repeat(inner);

        buf.set_string(area.x, area.y, format!("┌{horizontal}┐"), border);
        buf.set_string(area.x, area.y + 1, "│", border);
        buf.set_string(area.x + area.width - 1, area.y + 1, "│", border);
        buf.set_string(area.x, area.y + 2, format!("└{horizontal}┘"), border);

        let title_style = Style::default()
            .fg(theme::TITLE)
            .add_modifier(Modifier::BOLD);
        let (title_end, _) = buf.set_stringn(
            area.x + 2,
            area.y + 1,
            self.title,
            inner.saturating_sub(2),
            title_style,
        );

        // Right-aligned note, only when it fits after the title
        let note_width = self.note.width() as u16;
        let right = area.x + area.width - 2;
        if note_width > 0 && right >= note_width && right - note_width > title_end {
            buf.set_string(
                right - note_width,
                area.y + 1,
                self.note,
                Style::default().fg(theme::DIM_GRAY),
            );
        }
    }
}

/// Single-row rule between the list and the detail header
pub struct Separator;

impl Widget for Separator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_string(
            area.x,
            area.y,
            "─".repeat(area.width as usize),
            Style::default().fg(theme::BORDER),
        );
    }
}

/// Bottom line: the query editor in search mode, key hints otherwise
pub struct StatusLine<'a> {
    mode: InputMode,
    input: &'a QueryInput,
    /// Spinner frame to show while a fetch is in flight
    loading: Option<usize>,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: InputMode, input: &'a QueryInput) -> Self {
        Self {
            mode,
            input,
            loading: None,
        }
    }

    pub fn loading(mut self, frame: Option<usize>) -> Self {
        self.loading = frame;
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let right = area.x + area.width;
        let mut x = area.x;

        if let Some(frame) = self.loading {
            let spinner = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
            let (next_x, _) = buf.set_stringn(
                x,
                area.y,
                format!("{spinner} searching "),
                area.width as usize,
                Style::default().fg(theme::SPINNER),
            );
            x = next_x;
        }
        if x >= right {
            return;
        }

        match self.mode {
            InputMode::Search => {
                let prompt = Style::default().fg(theme::PROMPT);
                let (next_x, _) = buf.set_stringn(x, area.y, "/ ", (right - x) as usize, prompt);
                let (end_x, _) = buf.set_stringn(
                    next_x,
                    area.y,
                    self.input.value(),
                    right.saturating_sub(next_x) as usize,
                    prompt,
                );

                // Block cursor over the insertion point
                let cursor_x = next_x + self.input.position() as u16;
                if cursor_x < right && cursor_x <= end_x {
                    let cell = &mut buf[(cursor_x, area.y)];
                    cell.set_style(prompt.add_modifier(Modifier::REVERSED));
                    if cursor_x == end_x {
                        cell.set_symbol(" ");
                    }
                }
            }
            InputMode::Navigate => {
                buf.set_stringn(
                    x,
                    area.y,
                    NAVIGATE_HINTS,
                    (right - x) as usize,
                    Style::default().fg(theme::DIM_GRAY),
                );
            }
        }
    }
}
