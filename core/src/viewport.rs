//! Viewport Window
//!
//! A vertically scrollable buffer of styled lines with a fixed visible height.
//! The scroll offset is always clamped to `[0, lines - height]`.

use crate::format::StyledLine;

/// Scrollable text window backing the detail pane
#[derive(Clone, Debug, Default)]
pub struct Viewport {
    width: usize,
    height: usize,
    /// Screen row of the first content line
    y_position: usize,
    y_offset: usize,
    lines: Vec<StyledLine>,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn y_position(&self) -> usize {
        self.y_position
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Change the visible height, re-clamping the scroll offset
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.set_y_offset(self.y_offset);
    }

    /// Anchor the window at screen row `y`
    pub fn set_y_position(&mut self, y: usize) {
        self.y_position = y;
    }

    /// Replace the content, keeping the offset in range
    pub fn set_content(&mut self, lines: Vec<StyledLine>) {
        self.lines = lines;
        self.set_y_offset(self.y_offset);
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn total_line_count(&self) -> usize {
        self.lines.len()
    }

    fn max_y_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn set_y_offset(&mut self, n: usize) {
        self.y_offset = n.min(self.max_y_offset());
    }

    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_y_offset()
    }

    /// Scroll position in `0.0..=1.0`
    pub fn scroll_percent(&self) -> f64 {
        if self.height >= self.lines.len() {
            return 1.0;
        }
        let v = self.y_offset as f64 / (self.lines.len() - self.height) as f64;
        v.clamp(0.0, 1.0)
    }

    /// Lines currently inside the window
    pub fn visible_lines(&self) -> &[StyledLine] {
        let top = self.y_offset.min(self.lines.len());
        let bottom = (self.y_offset + self.height).min(self.lines.len());
        &self.lines[top..bottom]
    }

    pub fn line_down(&mut self, n: usize) {
        if self.at_bottom() || n == 0 {
            return;
        }
        self.set_y_offset(self.y_offset + n);
    }

    pub fn line_up(&mut self, n: usize) {
        if self.at_top() || n == 0 {
            return;
        }
        self.set_y_offset(self.y_offset.saturating_sub(n));
    }

    pub fn half_page_down(&mut self) {
        self.line_down((self.height / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.line_up((self.height / 2).max(1));
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }
}
