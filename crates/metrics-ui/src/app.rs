//! Application state and TUI event loop for the metrics dashboard.
//!
//! [`App`] owns the theme and the currently selected view and drives the
//! dashboard event loop over a fully built [`DashboardSnapshot`]. All
//! aggregation happens before the loop starts; the loop only switches views
//! and redraws.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use metrics_data::snapshot::DashboardSnapshot;

use crate::table_view;
use crate::themes::Theme;

// ── DashboardView ─────────────────────────────────────────────────────────────

/// Which aggregate the dashboard is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Users,
    Daily,
    Features,
    Ides,
    Languages,
    Global,
}

impl DashboardView {
    /// All views in tab order.
    pub const ALL: [DashboardView; 6] = [
        DashboardView::Users,
        DashboardView::Daily,
        DashboardView::Features,
        DashboardView::Ides,
        DashboardView::Languages,
        DashboardView::Global,
    ];

    /// Tab label for the header line.
    pub fn title(self) -> &'static str {
        match self {
            DashboardView::Users => "Users",
            DashboardView::Daily => "Daily",
            DashboardView::Features => "Features",
            DashboardView::Ides => "IDEs",
            DashboardView::Languages => "Languages",
            DashboardView::Global => "Global",
        }
    }

    /// Resolve a settings `--view` name. Unknown names fall back to `Users`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "daily" => DashboardView::Daily,
            "features" => DashboardView::Features,
            "ides" => DashboardView::Ides,
            "languages" => DashboardView::Languages,
            "global" => DashboardView::Global,
            _ => DashboardView::Users,
        }
    }

    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Currently selected view.
    pub view: DashboardView,
    /// Last load error to surface in the footer, if any.
    pub error: Option<String>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Create an app with the given theme name and initial view.
    pub fn new(theme_name: &str, view: DashboardView, error: Option<String>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view,
            error,
            should_quit: false,
        }
    }

    /// Run the dashboard event loop until `q` / `Ctrl+C`.
    ///
    /// Tab / arrow keys cycle through the six views. Uses
    /// `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without busy-waiting.
    pub async fn run_dashboard(mut self, snapshot: DashboardSnapshot) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame, &snapshot))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            self.should_quit = true;
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                        KeyCode::Tab | KeyCode::Right => self.view = self.view.next(),
                        KeyCode::BackTab | KeyCode::Left => self.view = self.view.prev(),
                        _ => {}
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Render the header tabs, the selected view, and the footer.
    fn render(&self, frame: &mut Frame, snapshot: &DashboardSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_tabs(frame, chunks[0]);

        if snapshot.metadata.records_count == 0 {
            table_view::render_no_data(frame, chunks[1], &self.theme);
        } else {
            match self.view {
                DashboardView::Users => {
                    table_view::render_users_table(frame, chunks[1], &snapshot.users, &self.theme)
                }
                DashboardView::Daily => {
                    table_view::render_daily_table(frame, chunks[1], &snapshot.daily, &self.theme)
                }
                DashboardView::Features => table_view::render_features_table(
                    frame,
                    chunks[1],
                    &snapshot.features,
                    &self.theme,
                ),
                DashboardView::Ides => {
                    table_view::render_ides_table(frame, chunks[1], &snapshot.ides, &self.theme)
                }
                DashboardView::Languages => table_view::render_languages_table(
                    frame,
                    chunks[1],
                    &snapshot.languages,
                    &self.theme,
                ),
                DashboardView::Global => {
                    table_view::render_global_stats(frame, chunks[1], &snapshot.global, &self.theme)
                }
            }
        }

        self.render_footer(frame, chunks[2]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let mut spans = vec![Span::styled(" Copilot Metrics ", self.theme.header)];
        for view in DashboardView::ALL {
            let style = if view == self.view {
                self.theme.tab_active
            } else {
                self.theme.tab_inactive
            };
            spans.push(Span::styled(format!(" {} ", view.title()), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let line = match &self.error {
            Some(message) => Line::from(Span::styled(format!(" {} ", message), self.theme.error)),
            None => Line::from(Span::styled(
                " Tab/←→ switch view · q quit ",
                self.theme.dim,
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
