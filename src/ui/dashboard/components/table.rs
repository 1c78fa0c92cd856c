//! Quote table component

use super::super::state::DashboardState;
use super::super::utils::{change_color, format_change, format_price, format_rsi};
use crate::metrics::format_volume;

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

const HEADERS: [&str; 8] = [
    "SYMBOL", "PRICE", "CHANGE", "OPEN", "HIGH", "LOW", "VOLUME", "SMA20 / RSI",
];

pub fn render_quote_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("QUOTES")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(snapshot) = &state.snapshot else {
        f.render_widget(Paragraph::new("Loading quotes...").block(block), area);
        return;
    };

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let rows = snapshot.quotes.iter().map(|quote| {
        let color = change_color(quote);
        Row::new(vec![
            Cell::from(quote.symbol.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(format_price(quote.price)),
            Cell::from(format_change(quote)).style(Style::default().fg(color)),
            Cell::from(format_price(quote.open)),
            Cell::from(format_price(quote.high)),
            Cell::from(format_price(quote.low)),
            Cell::from(format_volume(quote.volume as f64)),
            Cell::from(format!(
                "{} / {}",
                format_price(quote.sma20),
                format_rsi(quote.rsi)
            )),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
