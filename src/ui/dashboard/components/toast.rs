//! Transient error notification drawn over the dashboard

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const TOAST_WIDTH: u16 = 56;
const TOAST_HEIGHT: u16 = 5;

pub fn render_error_toast(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(notice) = state.error() else {
        return;
    };

    let toast_area = bottom_right(area, TOAST_WIDTH, TOAST_HEIGHT);
    let toast = Paragraph::new(notice.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title("ERROR")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );

    f.render_widget(Clear, toast_area);
    f.render_widget(toast, toast_area);
}

fn bottom_right(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}
