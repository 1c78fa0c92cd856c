//! Market summary component
//!
//! Active stock count, average volume and top performer

use super::super::state::DashboardState;
use super::super::utils::format_signed_percent;
use crate::metrics::MarketSummary;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_summary_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("MARKET SUMMARY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let lines = match &state.summary {
        Some(summary) => summary_lines(summary),
        None if state.snapshot.is_some() => vec![Line::from("No active stocks")],
        None => vec![Line::from("Waiting for first update...")],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn summary_lines(summary: &MarketSummary) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    vec![
        Line::from(vec![
            Span::styled("Active Stocks: ", label),
            Span::styled(summary.active_stocks.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Avg Volume:    ", label),
            Span::styled(summary.formatted_average_volume(), value),
        ]),
        Line::from(vec![
            Span::styled("Top Performer: ", label),
            Span::styled(summary.top_performer.clone(), value),
            Span::styled(
                format!(" ({})", format_signed_percent(summary.top_change_percent)),
                Style::default().fg(if summary.top_change_percent >= 0.0 {
                    Color::LightGreen
                } else {
                    Color::LightRed
                }),
            ),
        ]),
    ]
}
