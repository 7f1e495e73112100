//! Payload Formatter
//!
//! Turns a raw JSON payload into pretty-printed, classified, word-wrapped
//! lines for the detail pane. Classification is surface-neutral: the terminal
//! surface maps each [`TokenKind`] to a color.

use serde_json::Value;
use textwrap::{Options, WordSeparator, WordSplitter};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

/// Indentation unit for pretty-printed payloads
const INDENT: &str = "  ";

/// Why a payload could not be formatted
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Payload is empty or whitespace
    #[error("payload is empty")]
    Empty,

    /// Payload is not well-formed JSON
    #[error("payload is not valid JSON: {0}")]
    Invalid(String),
}

/// Lexical class of a run of formatted text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Object key (including its quotes)
    Key,
    String,
    Number,
    /// `true` / `false`
    Bool,
    Null,
    /// Braces, brackets, colons, commas
    Punctuation,
    /// Indentation and separators
    Plain,
}

/// A run of text sharing one [`TokenKind`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: TokenKind,
}

/// One display line made of classified segments
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub segments: Vec<Segment>,
}

impl StyledLine {
    /// A line holding a single plain segment
    pub fn plain(text: impl Into<String>) -> Self {
        let mut line = Self::default();
        line.push(text, TokenKind::Plain);
        line
    }

    /// Append text, merging with the previous segment when the kind matches
    pub fn push(&mut self, text: impl Into<String>, kind: TokenKind) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(&text),
            _ => self.segments.push(Segment { text, kind }),
        }
    }

    /// Concatenated text without classification
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.segments
            .iter()
            .flat_map(|s| s.text.chars())
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }
}

/// Formatter output
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedText {
    pub lines: Vec<StyledLine>,
}

impl FormattedText {
    /// Uncolored text, one line per row
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(StyledLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Converts raw payloads into displayable text
pub trait PayloadFormatter {
    /// Format `raw` for a pane `width` columns wide
    fn format(&self, raw: &str, width: usize) -> Result<FormattedText, FormatError>;
}

/// Pretty-printing JSON formatter
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadFormatter for JsonFormatter {
    fn format(&self, raw: &str, width: usize) -> Result<FormattedText, FormatError> {
        if raw.trim().is_empty() {
            return Err(FormatError::Empty);
        }

        let value: Value =
            serde_json::from_str(raw).map_err(|e| FormatError::Invalid(e.to_string()))?;

        let mut printer = Printer::default();
        printer.value(&value, 0);
        printer.finish();

        let lines = printer
            .lines
            .into_iter()
            .flat_map(|line| wrap_line(line, width))
            .collect();

        Ok(FormattedText { lines })
    }
}

/// Pretty printer that records token kinds as it goes
#[derive(Default)]
struct Printer {
    lines: Vec<StyledLine>,
    current: StyledLine,
}

impl Printer {
    fn newline(&mut self, depth: usize) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
        self.current.push(INDENT.repeat(depth), TokenKind::Plain);
    }

    fn finish(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    fn scalar(&mut self, value: &Value) {
        // Scalars serialize infallibly; fall back to an empty string anyway
        let text = serde_json::to_string(value).unwrap_or_default();
        let kind = match value {
            Value::String(_) => TokenKind::String,
            Value::Number(_) => TokenKind::Number,
            Value::Bool(_) => TokenKind::Bool,
            _ => TokenKind::Null,
        };
        self.current.push(text, kind);
    }

    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Object(map) if map.is_empty() => self.current.push("{}", TokenKind::Punctuation),
            Value::Array(items) if items.is_empty() => {
                self.current.push("[]", TokenKind::Punctuation)
            }
            Value::Object(map) => {
                self.current.push("{", TokenKind::Punctuation);
                let last = map.len() - 1;
                for (i, (key, item)) in map.iter().enumerate() {
                    self.newline(depth + 1);
                    let key = serde_json::to_string(key).unwrap_or_default();
                    self.current.push(key, TokenKind::Key);
                    self.current.push(":", TokenKind::Punctuation);
                    self.current.push(" ", TokenKind::Plain);
                    self.value(item, depth + 1);
                    if i < last {
                        self.current.push(",", TokenKind::Punctuation);
                    }
                }
                self.newline(depth);
                self.current.push("}", TokenKind::Punctuation);
            }
            Value::Array(items) => {
                self.current.push("[", TokenKind::Punctuation);
                let last = items.len() - 1;
                for (i, item) in items.iter().enumerate() {
                    self.newline(depth + 1);
                    self.value(item, depth + 1);
                    if i < last {
                        self.current.push(",", TokenKind::Punctuation);
                    }
                }
                self.newline(depth);
                self.current.push("]", TokenKind::Punctuation);
            }
            scalar => self.scalar(scalar),
        }
    }
}

/// Word-wrap a styled line at `width` display columns
///
/// Breaks fall on spaces; a word longer than `width` is split. Whitespace
/// at a break is dropped and every row keeps the token kinds of the text
/// it carries. A width of zero disables wrapping.
pub fn wrap_line(line: StyledLine, width: usize) -> Vec<StyledLine> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let text = line.text();
    let options = Options::new(width)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation);

    // Wrapped rows are slices of `text`; find each one after the previous
    let mut ranges = Vec::new();
    let mut pos = 0;
    for row in textwrap::wrap(&text, options) {
        if row.is_empty() {
            continue;
        }
        let Some(found) = text[pos..].find(row.as_ref()) else {
            continue;
        };
        let start = pos + found;
        pos = start + row.len();
        ranges.push(start..pos);
    }
    if ranges.is_empty() {
        return vec![line];
    }

    let mut starts = Vec::with_capacity(line.segments.len());
    let mut offset = 0;
    for segment in &line.segments {
        starts.push(offset);
        offset += segment.text.len();
    }

    ranges
        .into_iter()
        .map(|range| {
            let mut row = StyledLine::default();
            for (segment, &start) in line.segments.iter().zip(&starts) {
                let from = range.start.max(start);
                let to = range.end.min(start + segment.text.len());
                if from < to {
                    row.push(&segment.text[from - start..to - start], segment.kind);
                }
            }
            row
        })
        .collect()
}
