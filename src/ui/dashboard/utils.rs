//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::quotes::Quote;
use ratatui::prelude::Color;

/// `$176.12`
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// `+1.12` or `-0.40`
pub fn format_signed(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}", sign, value)
}

/// `+0.64%` or `-1.20%`
pub fn format_signed_percent(value: f64) -> String {
    format!("{}%", format_signed(value))
}

/// Price change with percent, as shown on a quote card: `+1.12 (+0.64%)`
pub fn format_change(quote: &Quote) -> String {
    format!(
        "{} ({})",
        format_signed(quote.change),
        format_signed_percent(quote.change_percent)
    )
}

pub fn format_rsi(value: f64) -> String {
    format!("{:.1}", value)
}

/// Green for gains (and flat), red for losses
pub fn change_color(quote: &Quote) -> Color {
    if quote.is_positive() {
        Color::LightGreen
    } else {
        Color::LightRed
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            if let Some(month_day) = date_part.get(5..10) {
                if let Some(hour_min_sec) = time_part.get(0..8) {
                    return format!("{} {}", month_day, hour_min_sec);
                }
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Failed to load stock data: request timed out".to_string();
    }
    if msg.contains("Reqwest error") && msg.contains("connect") {
        return "Failed to load stock data: server unreachable".to_string();
    }
    msg.to_string()
}
