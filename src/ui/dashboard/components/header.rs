//! Dashboard header component
//!
//! Renders the title and refresh progress gauge

use super::super::state::DashboardState;
use crate::refresh::RefreshStatus;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh status.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("STOCK DASHBOARD v{} | {}", version, state.endpoint))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let last_update = state
        .snapshot
        .as_ref()
        .map(|snapshot| snapshot.local_time_label())
        .unwrap_or_else(|| "--:--:--".to_string());

    // Loading takes priority, then auto-refresh status
    let (progress_text, gauge_color, progress_percent) = if state.is_loading() {
        // Loops every 20 ticks
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            format!("LOADING - Fetching quotes | Last update {}", last_update),
            Color::LightYellow,
            progress,
        )
    } else {
        match state.status {
            RefreshStatus::Live => (
                format!(
                    "LIVE - Every {}s | Last update {}",
                    state.interval_secs, last_update
                ),
                Color::LightGreen,
                100,
            ),
            RefreshStatus::Paused => (
                format!("PAUSED | Last update {}", last_update),
                Color::DarkGray,
                0,
            ),
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
