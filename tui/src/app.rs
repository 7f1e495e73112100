//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin client of the
//! [`Controller`]:
//! - Event loop (keyboard, resize, fetch completions, frame tick)
//! - Fetch tasks against the [`LogSource`]
//! - Rendering from controller state
//!
//! All browsing decisions live in the controller. The App only translates
//! terminal events, performs the [`Action`]s that come back and draws.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use trailview_core::{
    fetch_or_empty, Action, Controller, InputEvent, LogSource, PapertrailSource, SearchRequest,
    CHROME_ROWS,
};

use crate::config::AppConfig;
use crate::input::translate_key;
use crate::theme;
use crate::widgets::{BoxHeader, DetailView, EntryList, Separator, StatusLine};

/// Spinner / redraw cadence
const TICK: Duration = Duration::from_millis(100);

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Browsing state machine
    controller: Controller,

    // === Fetching ===
    source: Arc<dyn LogSource>,
    fetch_timeout: Duration,
    /// Completed fetches come back through here
    results_tx: mpsc::UnboundedSender<InputEvent>,
    results_rx: mpsc::UnboundedReceiver<InputEvent>,
    /// The fetch in flight, if any
    fetch_task: Option<JoinHandle<()>>,

    // === Misc State ===
    spinner_frame: usize,
}

impl App {
    /// Create an App browsing Papertrail
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let source = PapertrailSource::new(config.source.clone())?;
        Ok(Self::with_source(Arc::new(source), config.source.timeout))
    }

    /// Create an App over any log source
    pub fn with_source(source: Arc<dyn LogSource>, fetch_timeout: Duration) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            controller: Controller::new(),
            source,
            fetch_timeout,
            results_tx,
            results_rx,
            fetch_task: None,
            spinner_frame: 0,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        let (width, height) = crossterm::terminal::size()?;
        self.dispatch(InputEvent::Resize { width, height });

        let request = self.controller.initial_fetch();
        self.spawn_fetch(request);

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event),
                        Some(Err(e)) => return Err(e.into()),
                        None => self.running = false,
                    }
                }

                // Finished fetches
                Some(event) = self.results_rx.recv() => self.dispatch(event),

                // Frame tick - advance the spinner
                _ = tick.tick() => {
                    if self.controller.is_loading() {
                        self.spinner_frame = self.spinner_frame.wrapping_add(1);
                    }
                }
            }

            self.render(terminal)?;
        }

        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(key) = translate_key(key) {
                    self.dispatch(InputEvent::Key(key));
                }
            }
            Event::Resize(width, height) => self.dispatch(InputEvent::Resize { width, height }),
            _ => {}
        }
    }

    /// Feed one event to the controller and perform what it asks for
    fn dispatch(&mut self, event: InputEvent) {
        match self.controller.handle(event) {
            Action::None => {}
            Action::Quit => {
                tracing::info!("quit requested");
                self.running = false;
            }
            Action::Fetch(request) => self.spawn_fetch(request),
            Action::CancelFetch(id) => {
                if let Some(task) = self.fetch_task.take() {
                    task.abort();
                }
                tracing::debug!(id = %id, "fetch task aborted");
            }
        }
    }

    /// Start a fetch, abandoning whichever one was running
    fn spawn_fetch(&mut self, request: SearchRequest) {
        if let Some(previous) = self.fetch_task.take() {
            previous.abort();
        }
        self.spinner_frame = 0;

        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        let timeout = self.fetch_timeout;

        self.fetch_task = Some(tokio::spawn(async move {
            let entries = fetch_or_empty(source.as_ref(), &request.query, timeout).await;
            // A closed channel means the app is shutting down
            let _ = tx.send(InputEvent::SearchCompleted {
                id: request.id,
                entries,
            });
        }));
    }

    /// Render the UI
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            self.draw(area, frame.buffer_mut());
        })?;
        Ok(())
    }

    /// Paint the whole screen from controller state
    fn draw(&self, area: Rect, buf: &mut Buffer) {
        let layout = self.controller.layout();

        if !layout.is_ready() {
            buf.set_stringn(
                area.x,
                area.y,
                "Initializing…",
                area.width as usize,
                Style::default().fg(theme::DIM_GRAY),
            );
            return;
        }
        if (area.height as usize) < CHROME_ROWS {
            buf.set_stringn(
                area.x,
                area.y,
                "Terminal too small",
                area.width as usize,
                Style::default().fg(theme::DIM_GRAY),
            );
            return;
        }

        let browser = self.controller.browser();
        let search = self.controller.search();
        let viewport = layout.viewport();

        // Rows come from the layout; clip in case the frame and layout disagree
        let row = |y: usize, height: usize| {
            Rect::new(area.x, area.y + y as u16, area.width, height as u16).intersection(area)
        };

        let title = format!(
            "{} · {}",
            self.source.name(),
            match search.active_query() {
                Some(q) if !q.is_empty() => q,
                _ => "latest events",
            }
        );
        let selected = browser.selected().count();
        let counts = if selected > 0 {
            format!("{} entries · {} selected", browser.len(), selected)
        } else {
            format!("{} entries", browser.len())
        };
        BoxHeader::new(&title)
            .note(&counts)
            .render(row(0, 3), buf);

        EntryList::new(browser).render(row(layout.list_y(), layout.list_rows()), buf);
        Separator.render(row(layout.list_y() + layout.list_rows(), 1), buf);

        let detail_title = match browser.current() {
            Some(entry) => entry.summary(),
            None => "No entry".to_string(),
        };
        let position = if viewport.total_line_count() > viewport.height() {
            format!("{:3.0}%", viewport.scroll_percent() * 100.0)
        } else {
            String::new()
        };
        BoxHeader::new(&detail_title)
            .note(&position)
            .render(row(layout.detail_header_y(), 3), buf);

        DetailView::new(viewport, self.controller.detail())
            .render(row(viewport.y_position(), layout.detail_rows()), buf);

        let loading = self.controller.is_loading().then_some(self.spinner_frame);
        StatusLine::new(self.controller.mode(), search.input())
            .loading(loading)
            .render(row(layout.status_y(), 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use trailview_core::{Key, LogEntry, Severity, SourceError};

    struct StubSource;

    #[async_trait]
    impl LogSource for StubSource {
        fn name(&self) -> &str {
            "Stub"
        }

        async fn fetch(&self, query: &str) -> Result<Vec<LogEntry>, SourceError> {
            let n = if query.is_empty() { 5 } else { 2 };
            Ok((0..n)
                .map(|i| LogEntry {
                    env: "prod".to_string(),
                    program: "api".to_string(),
                    severity: Severity::Error,
                    label: format!("job-{i}"),
                    message: format!("{query} {i}"),
                    payload: format!(r#"{{"n":{i}}}"#),
                    timestamp: "2024-03-09T08:15:00Z".to_string(),
                })
                .collect())
        }
    }

    fn app() -> App {
        App::with_source(Arc::new(StubSource), Duration::from_secs(1))
    }

    fn screen(app: &App, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        app.draw(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_initializing_before_first_resize() {
        let app = app();
        assert_eq!(screen(&app, 40, 10)[0], "Initializing…");
    }

    #[test]
    fn test_draws_panes_at_layout_rows() {
        let mut app = app();
        app.dispatch(InputEvent::Resize {
            width: 80,
            height: 28,
        });
        let request = app.controller.initial_fetch();
        let entries = (0..3)
            .map(|i| LogEntry {
                env: "prod".to_string(),
                program: "api".to_string(),
                severity: Severity::Info,
                label: format!("job-{i}"),
                message: "done".to_string(),
                payload: r#"{"ok":true}"#.to_string(),
                timestamp: "2024-03-09T08:15:00Z".to_string(),
            })
            .collect();
        app.dispatch(InputEvent::SearchCompleted {
            id: request.id,
            entries,
        });

        // 20 pane rows: 12 list, 8 detail
        let rows = screen(&app, 80, 28);
        assert!(rows[1].contains("Stub · latest events"));
        assert!(rows[1].contains("3 entries"));
        assert!(rows[3].starts_with("==>"));
        assert!(rows[4].contains("~done"));
        assert!(rows[15].starts_with("────"));
        assert!(rows[17].contains("[prod] -  info  (job-0) ~done"));
        assert_eq!(rows[19], "{");
        assert_eq!(rows[20], "  \"ok\": true");
        assert!(rows[27].contains("q quit"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app();
        app.dispatch(InputEvent::Resize {
            width: 10,
            height: 5,
        });
        assert_eq!(screen(&app, 10, 5)[0], "Terminal t");
    }

    #[tokio::test]
    async fn test_search_round_trip_through_fetch_task() {
        let mut app = app();
        app.dispatch(InputEvent::Resize {
            width: 100,
            height: 40,
        });

        app.dispatch(InputEvent::Key(Key::Char('/')));
        for c in "boom".chars() {
            app.dispatch(InputEvent::Key(Key::Char(c)));
        }
        app.dispatch(InputEvent::Key(Key::Enter));
        assert!(app.fetch_task.is_some());
        assert!(app.controller.is_loading());

        let event = app.results_rx.recv().await.unwrap();
        app.dispatch(event);
        assert_eq!(app.controller.browser().len(), 2);
        assert_eq!(app.controller.search().active_query(), Some("boom"));
        assert!(!app.controller.is_loading());
    }

    #[tokio::test]
    async fn test_quit_stops_the_loop() {
        let mut app = app();
        app.dispatch(InputEvent::Key(Key::Interrupt));
        assert!(!app.running);
    }
}
