//! DetailView Widget
//!
//! A borderless, scrollable view of the formatted payload. Scrolling and
//! wrapping already happened in the [`Viewport`]; this only paints the
//! visible lines with token colors.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use trailview_core::{DetailContent, Viewport};

use crate::theme;

/// The detail pane
pub struct DetailView<'a> {
    viewport: &'a Viewport,
    content: &'a DetailContent,
}

impl<'a> DetailView<'a> {
    pub fn new(viewport: &'a Viewport, content: &'a DetailContent) -> Self {
        Self { viewport, content }
    }
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let placeholder = matches!(self.content, DetailContent::Unrenderable(_));
        let right = area.x + area.width;

        for (i, line) in self
            .viewport
            .visible_lines()
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            let mut x = area.x;
            for segment in &line.segments {
                if x >= right {
                    break;
                }
                let style = if placeholder {
                    Style::default().fg(theme::DIM_GRAY)
                } else {
                    theme::token_style(segment.kind)
                };
                let (next_x, _) =
                    buf.set_stringn(x, y, &segment.text, (right - x) as usize, style);
                x = next_x;
            }
        }
    }
}
