//! Market summary metrics.
//!
//! Stateless aggregation over a quote set: average volume, top performer and
//! volume formatting.

use crate::quotes::Quote;
use thiserror::Error;

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Cannot aggregate an empty quote set")]
    EmptyQuoteSet,
}

/// Arithmetic mean of `volume` across all quotes.
pub fn average_volume(quotes: &[Quote]) -> Result<f64, MetricsError> {
    if quotes.is_empty() {
        return Err(MetricsError::EmptyQuoteSet);
    }
    // u128 cannot overflow for any realistic number of u64 volumes.
    let total: u128 = quotes.iter().map(|q| u128::from(q.volume)).sum();
    Ok(total as f64 / quotes.len() as f64)
}

/// The quote with the highest `change_percent`; the first one wins a tie.
pub fn top_performer(quotes: &[Quote]) -> Result<&Quote, MetricsError> {
    let mut iter = quotes.iter();
    let first = iter.next().ok_or(MetricsError::EmptyQuoteSet)?;
    Ok(iter.fold(first, |best, quote| {
        if quote.change_percent > best.change_percent {
            quote
        } else {
            best
        }
    }))
}

/// Human-readable volume: `7.00B`, `2.34M`, `1.50K`, or the rounded count.
///
/// Thresholds are inclusive, so exactly one billion prints as `1.00B`.
/// Negative and NaN inputs print as `0`.
pub fn format_volume(volume: f64) -> String {
    if volume >= BILLION {
        format!("{:.2}B", volume / BILLION)
    } else if volume >= MILLION {
        format!("{:.2}M", volume / MILLION)
    } else if volume >= THOUSAND {
        format!("{:.2}K", volume / THOUSAND)
    } else {
        group_thousands(volume.round() as u64)
    }
}

/// Formats an integer with `,` thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Aggregate figures shown next to the quote table.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub active_stocks: usize,
    pub average_volume: f64,
    pub top_performer: String,
    pub top_change_percent: f64,
}

impl MarketSummary {
    pub fn from_quotes(quotes: &[Quote]) -> Result<Self, MetricsError> {
        let average_volume = average_volume(quotes)?;
        let top = top_performer(quotes)?;
        Ok(Self {
            active_stocks: quotes.len(),
            average_volume,
            top_performer: top.symbol.clone(),
            top_change_percent: top.change_percent,
        })
    }

    pub fn formatted_average_volume(&self) -> String {
        format_volume(self.average_volume)
    }
}
