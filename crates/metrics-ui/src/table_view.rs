//! Table renderers for the six aggregate views.
//!
//! Each renderer draws a bordered [`ratatui::widgets::Table`] with one row
//! per aggregate entry, keeping the view's fixed ordering as produced by the
//! aggregator.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use metrics_core::formatting::{format_count, format_percent};
use metrics_core::models::{
    DailyMetrics, FeatureMetrics, GlobalStats, IdeMetrics, LanguageMetrics, UserSummary,
};

use crate::themes::Theme;

/// Maximum display width for name-like cells before truncation.
const NAME_COLUMN_WIDTH: usize = 24;

/// Per-user summary table, one row per user.
pub fn render_users_table(frame: &mut Frame, area: Rect, users: &[UserSummary], theme: &Theme) {
    let header = [
        "User",
        "Interactions",
        "Generated",
        "Accepted",
        "Accept %",
        "Active Days",
        "Last Active",
        "Primary IDE",
        "LOC Added",
    ];
    let rows = users.iter().map(|user| {
        vec![
            Cell::from(truncate_name(&user.user_login)),
            Cell::from(format_count(user.total_interactions)),
            Cell::from(format_count(user.total_code_generated)),
            Cell::from(format_count(user.total_code_accepted)),
            Cell::from(format_percent(user.acceptance_rate)),
            Cell::from(format_count(user.active_days)),
            Cell::from(user.last_active_day.clone()),
            Cell::from(truncate_name(&user.primary_ide)),
            Cell::from(format_count(user.loc_added)),
        ]
    });
    let widths = [
        Constraint::Length(20),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(10),
    ];
    render_table(frame, area, "Users", &header, rows, &widths, theme);
}

/// Per-day metrics table, ascending by day.
pub fn render_daily_table(frame: &mut Frame, area: Rect, daily: &[DailyMetrics], theme: &Theme) {
    let header = [
        "Day",
        "Active Users",
        "Interactions",
        "Generated",
        "Accepted",
        "Accept %",
    ];
    let rows = daily.iter().map(|day| {
        vec![
            Cell::from(day.day.clone()),
            Cell::from(format_count(day.active_users)),
            Cell::from(format_count(day.total_interactions)),
            Cell::from(format_count(day.total_code_generated)),
            Cell::from(format_count(day.total_code_accepted)),
            Cell::from(format_percent(day.acceptance_rate)),
        ]
    });
    let widths = [
        Constraint::Length(12),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(9),
    ];
    render_table(frame, area, "Daily Activity", &header, rows, &widths, theme);
}

/// Per-feature metrics table, descending by code generated.
pub fn render_features_table(
    frame: &mut Frame,
    area: Rect,
    features: &[FeatureMetrics],
    theme: &Theme,
) {
    let header = ["Feature", "Interactions", "Generated", "Accepted", "Accept %"];
    let rows = features.iter().map(|feature| {
        vec![
            Cell::from(truncate_name(&feature.feature)),
            Cell::from(format_count(feature.interactions)),
            Cell::from(format_count(feature.code_generated)),
            Cell::from(format_count(feature.code_accepted)),
            Cell::from(format_percent(feature.acceptance_rate)),
        ]
    });
    let widths = [
        Constraint::Length(26),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(9),
    ];
    render_table(frame, area, "Features", &header, rows, &widths, theme);
}

/// Per-editor metrics table, descending by distinct-user count.
pub fn render_ides_table(frame: &mut Frame, area: Rect, ides: &[IdeMetrics], theme: &Theme) {
    let header = ["IDE", "Users", "Interactions", "Generated", "Accepted"];
    let rows = ides.iter().map(|ide| {
        vec![
            Cell::from(truncate_name(&ide.ide)),
            Cell::from(format_count(ide.users)),
            Cell::from(format_count(ide.interactions)),
            Cell::from(format_count(ide.code_generated)),
            Cell::from(format_count(ide.code_accepted)),
        ]
    });
    let widths = [
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
    ];
    render_table(frame, area, "Editors", &header, rows, &widths, theme);
}

/// Per-language metrics table, descending by code generated.
pub fn render_languages_table(
    frame: &mut Frame,
    area: Rect,
    languages: &[LanguageMetrics],
    theme: &Theme,
) {
    let header = ["Language", "Generated", "Accepted", "Accept %"];
    let rows = languages.iter().map(|language| {
        vec![
            Cell::from(truncate_name(&language.language)),
            Cell::from(format_count(language.code_generated)),
            Cell::from(format_count(language.code_accepted)),
            Cell::from(format_percent(language.acceptance_rate)),
        ]
    });
    let widths = [
        Constraint::Length(20),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(9),
    ];
    render_table(frame, area, "Languages", &header, rows, &widths, theme);
}

/// Whole-dataset statistics as a label/value panel.
pub fn render_global_stats(frame: &mut Frame, area: Rect, stats: &GlobalStats, theme: &Theme) {
    let span = if stats.report_start_day.is_empty() && stats.report_end_day.is_empty() {
        "-".to_string()
    } else {
        format!("{} to {}", stats.report_start_day, stats.report_end_day)
    };

    let entries = [
        ("Report span", span),
        ("Total users", format_count(stats.total_users)),
        ("Total interactions", format_count(stats.total_interactions)),
        ("Code generated", format_count(stats.total_code_generated)),
        ("Code accepted", format_count(stats.total_code_accepted)),
        (
            "Average acceptance rate",
            format_percent(stats.average_acceptance_rate),
        ),
        ("LOC added", format_count(stats.total_loc_added)),
        ("LOC suggested", format_count(stats.total_loc_suggested)),
    ];

    let mut lines = vec![Line::from("")];
    for (label, value) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<26}", label), theme.label),
            Span::styled(value, theme.value),
        ]));
    }

    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Global Stats "),
        ),
        area,
    );
}

/// Placeholder shown when no metrics have been loaded yet.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No metrics data loaded", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Start with --data <file.ndjson> to load a metrics export.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Copilot Metrics "),
        ),
        area,
    );
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Shared table scaffolding: header row, zebra-striped data rows, bordered
/// block.
fn render_table<'a>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    header: &'a [&'a str],
    rows: impl Iterator<Item = Vec<Cell<'a>>>,
    widths: &[Constraint],
    theme: &Theme,
) {
    let header_row = Row::new(
        header
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = rows
        .enumerate()
        .map(|(i, cells)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(cells).style(style)
        })
        .collect();

    let table = Table::new(data_rows, widths.to_vec())
        .header(header_row)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Truncate a name to the column's display width, honouring wide glyphs.
fn truncate_name(name: &str) -> String {
    if name.width() <= NAME_COLUMN_WIDTH {
        return name.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > NAME_COLUMN_WIDTH.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn user(login: &str, interactions: u64) -> UserSummary {
        UserSummary {
            user_login: login.to_string(),
            user_id: 1,
            total_interactions: interactions,
            total_code_generated: 5,
            total_code_accepted: 2,
            acceptance_rate: 40,
            active_days: 3,
            last_active_day: "2024-01-15".to_string(),
            primary_ide: "VS Code".to_string(),
            loc_added: 10,
            loc_suggested: 20,
        }
    }

    // ── truncate_name ─────────────────────────────────────────────────────

    #[test]
    fn test_truncate_name_short_unchanged() {
        assert_eq!(truncate_name("alice"), "alice");
    }

    #[test]
    fn test_truncate_name_long_gets_ellipsis() {
        let long = "a".repeat(40);
        let truncated = truncate_name(&long);
        assert!(truncated.ends_with('…'));
        assert!(truncated.width() <= NAME_COLUMN_WIDTH);
    }

    // ── Render (does not panic) ───────────────────────────────────────────

    #[test]
    fn test_render_users_table_does_not_panic() {
        let backend = TestBackend::new(130, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let users = vec![user("alice", 10), user("bob", 5)];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_users_table(frame, area, &users, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_daily_table_does_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let daily = vec![DailyMetrics {
            day: "2024-01-15".to_string(),
            active_users: 2,
            total_interactions: 14,
            total_code_generated: 7,
            total_code_accepted: 3,
            acceptance_rate: 43,
        }];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_daily_table(frame, area, &daily, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_features_and_languages_do_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let features = vec![FeatureMetrics {
            feature: "Code Completion".to_string(),
            interactions: 6,
            code_generated: 16,
            code_accepted: 8,
            acceptance_rate: 50,
        }];
        let languages = vec![LanguageMetrics {
            language: "Rust".to_string(),
            code_generated: 7,
            code_accepted: 3,
            acceptance_rate: 43,
        }];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_features_table(frame, area, &features, &theme);
            })
            .unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_languages_table(frame, area, &languages, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_ides_table_does_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let ides = vec![IdeMetrics {
            ide: "VS Code".to_string(),
            users: 2,
            interactions: 8,
            code_generated: 5,
            code_accepted: 2,
        }];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_ides_table(frame, area, &ides, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_global_stats_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let stats = GlobalStats {
            total_users: 2,
            total_interactions: 14,
            total_code_generated: 7,
            total_code_accepted: 3,
            average_acceptance_rate: 43,
            report_start_day: "2024-01-01".to_string(),
            report_end_day: "2024-01-31".to_string(),
            total_loc_added: 13,
            total_loc_suggested: 26,
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_global_stats(frame, area, &stats, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_tables_do_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_users_table(frame, area, &[], &theme);
            })
            .unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_daily_table(frame, area, &[], &theme);
            })
            .unwrap();
    }
}
