//! Dashboard main renderer

use super::components::{footer, header, logs, summary, table, toast};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    table::render_quote_table(f, main_chunks[1], state);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[2]);

    summary::render_summary_panel(f, bottom_chunks[0], state);
    logs::render_logs_panel(f, bottom_chunks[1], state);
    footer::render_footer(f, main_chunks[3]);

    toast::render_error_toast(f, f.area(), state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefreshConfig;
    use crate::events::Event;
    use crate::metrics::tests::quote;
    use crate::quotes::Snapshot;
    use crate::renderer::dispatch;
    use chrono::DateTime;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn screen(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_quotes_and_summary() {
        let mut state = DashboardState::new(
            "http://localhost:5000/api/stocks".to_string(),
            RefreshConfig::default(),
            false,
        );
        let snapshot = Arc::new(Snapshot {
            quotes: vec![quote("AAA", 10.0, 1_500_000), quote("BBB", -2.0, 500_000)],
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
        });
        dispatch(&mut state, &Event::data_updated(snapshot));

        let text = screen(&state);
        assert!(text.contains("AAA"));
        assert!(text.contains("+1.00 (+10.00%)"));
        // Summary average, then per-quote volumes in the table
        assert!(text.contains("1.00M"));
        assert!(text.contains("1.50M"));
        assert!(text.contains("500.00K"));
        assert!(text.contains("[R] Refresh"));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn test_renders_error_toast() {
        let mut state = DashboardState::new(
            "http://localhost:5000/api/stocks".to_string(),
            RefreshConfig::default(),
            false,
        );
        dispatch(
            &mut state,
            &Event::error_occurred(
                "Failed to load".to_string(),
                "detail".to_string(),
                crate::logging::LogLevel::Warn,
            ),
        );
        assert!(screen(&state).contains("Failed to load"));
    }
}
