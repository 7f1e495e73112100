//! Trailview Entry Point
//!
//! Launches the terminal log browser.
//!
//! Usage:
//!   trailview
//!
//! Environment:
//!   PAPERTRAIL_KEY                 API token
//!   TRAILVIEW_ENDPOINT             Search endpoint override
//!   TRAILVIEW_LIMIT                Events per query (default: 100)
//!   TRAILVIEW_FETCH_TIMEOUT_SECS   Bound on one fetch (default: 30)
//!   TRAILVIEW_LOG                  Write tracing output to this file
//!   RUST_LOG                       Tracing filter (default: info)

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::Path;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trailview_tui::{App, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: trailview requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    let config = AppConfig::from_env();
    init_logging(config.log_file.as_deref())?;

    // Fail before touching the terminal so the error stays readable
    let mut app = App::new(&config)?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Send tracing output to `path`; without a path nothing is logged, since
/// stdout and stderr belong to the full-screen UI
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
