//! Theme and Colors
//!
//! Palette for the browser. Row colors use the 16-color ANSI indexes so they
//! follow the user's terminal scheme.

use ratatui::style::{Color, Modifier, Style};

use trailview_core::{Severity, TokenKind};

// ============================================================================
// Chrome
// ============================================================================

/// Box borders around the title and detail header
pub const BORDER: Color = Color::Rgb(100, 100, 100);

/// Title text
pub const TITLE: Color = Color::Magenta;

/// Status line and hints
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Search prompt and query text
pub const PROMPT: Color = Color::Rgb(130, 220, 130);

/// Loading spinner
pub const SPINNER: Color = Color::Magenta;

// ============================================================================
// List Rows
// ============================================================================

/// Cursor marker
pub const CURSOR: Color = Color::Indexed(13);

/// Selection marker
pub const SELECTED: Color = Color::Indexed(11);

/// Environment tag
pub const ENV: Color = Color::Indexed(14);

/// Severity badge colors (background)
pub fn severity_style(severity: &Severity) -> Style {
    let bg = match severity {
        Severity::Error => Color::Indexed(1),
        Severity::Warning => Color::Indexed(11),
        Severity::Info => Color::Indexed(10),
        Severity::Other(_) => Color::Indexed(15),
    };
    Style::default().fg(Color::Black).bg(bg)
}

// ============================================================================
// Payload Tokens
// ============================================================================

/// Style for one classified payload token
pub fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Key => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        TokenKind::String => Style::default().fg(Color::Green),
        TokenKind::Number => Style::default().fg(Color::Yellow),
        TokenKind::Bool | TokenKind::Null => Style::default().fg(Color::Cyan),
        TokenKind::Punctuation | TokenKind::Plain => Style::default(),
    }
}
