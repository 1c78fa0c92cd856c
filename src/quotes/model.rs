//! Quote payload types
//!
//! Wire types for the `/api/stocks` response and the validated `Snapshot`
//! built from them.

use super::error::QuoteSourceError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Server timestamp format, e.g. `2024-03-01 14:05:09` in server-local time.
const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Status value the quote endpoint reports on success.
pub const SUCCESS_STATUS: &str = "success";

/// One instrument's latest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub change: f64,
    pub change_percent: f64,
    pub sma20: f64,
    pub rsi: f64,
    /// 50-period moving average, when the server computes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma50: Option<f64>,
    /// Annualized volatility, when the server computes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Per-quote generation time as reported by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A market-data invariant a quote breaks. Such quotes are still shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum QuoteAnomaly {
    #[strum(to_string = "negative price")]
    NegativePrice,
    #[strum(to_string = "high below low")]
    HighBelowLow,
    #[strum(to_string = "RSI outside 0-100")]
    RsiOutOfRange,
    #[strum(to_string = "change and change percent disagree in sign")]
    SignMismatch,
    #[strum(to_string = "duplicate symbol")]
    DuplicateSymbol,
}

impl Quote {
    /// Whether the quote moved up (or stayed flat) since the prior close.
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Invariants this quote breaks on its own.
    pub fn anomalies(&self) -> Vec<QuoteAnomaly> {
        let mut found = Vec::new();
        if [self.price, self.open, self.high, self.low]
            .iter()
            .any(|v| *v < 0.0)
        {
            found.push(QuoteAnomaly::NegativePrice);
        }
        if self.high < self.low {
            found.push(QuoteAnomaly::HighBelowLow);
        }
        if !(0.0..=100.0).contains(&self.rsi) {
            found.push(QuoteAnomaly::RsiOutOfRange);
        }
        if (self.change > 0.0 && self.change_percent < 0.0)
            || (self.change < 0.0 && self.change_percent > 0.0)
        {
            found.push(QuoteAnomaly::SignMismatch);
        }
        found
    }
}

/// Every anomaly in a quote list as `(index, anomaly)`. Repeats of a symbol
/// are flagged on each occurrence after the first.
pub fn find_anomalies(quotes: &[Quote]) -> Vec<(usize, QuoteAnomaly)> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for (i, quote) in quotes.iter().enumerate() {
        found.extend(quote.anomalies().into_iter().map(|a| (i, a)));
        if !seen.insert(quote.symbol.as_str()) {
            found.push((i, QuoteAnomaly::DuplicateSymbol));
        }
    }
    found
}

/// Raw response body of the quote endpoint, before validation.
///
/// Every field is optional here so that a payload missing `status` or `stocks`
/// decodes fine and is rejected by [`QuotesResponse::into_snapshot`] with a
/// validation error rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub stocks: Option<Vec<Quote>>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
}

impl QuotesResponse {
    /// Build a successful response, mostly useful for tests and mocks.
    pub fn success(stocks: Vec<Quote>, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: Some(SUCCESS_STATUS.to_string()),
            stocks: Some(stocks),
            timestamp: Some(serde_json::Value::String(timestamp.to_rfc3339())),
        }
    }

    /// Validate the payload and turn it into a snapshot.
    ///
    /// Only a failing `status` or missing `stocks` is an error. A missing or
    /// unreadable timestamp falls back to the receipt time, and quotes that
    /// break market-data invariants are kept with a warning.
    pub fn into_snapshot(self) -> Result<Snapshot, QuoteSourceError> {
        match self.status.as_deref() {
            Some(SUCCESS_STATUS) => {}
            Some(other) => {
                return Err(QuoteSourceError::Validation(format!(
                    "unexpected status \"{}\"",
                    other
                )));
            }
            None => return Err(QuoteSourceError::Validation("missing status".to_string())),
        }

        let quotes = self
            .stocks
            .ok_or_else(|| QuoteSourceError::Validation("missing stocks".to_string()))?;

        for (i, anomaly) in find_anomalies(&quotes) {
            warn!("Quote {} ({}) accepted with {}", i, quotes[i].symbol, anomaly);
        }

        let timestamp = match self.timestamp.as_ref().and_then(parse_timestamp) {
            Some(timestamp) => timestamp,
            None => {
                warn!(
                    "Response timestamp {:?} missing or unreadable, using receipt time",
                    self.timestamp
                );
                Utc::now()
            }
        };

        Ok(Snapshot { quotes, timestamp })
    }
}

/// The full set of quotes plus the time they were produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub quotes: Vec<Quote>,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Last-update label shown to the user, in local wall-clock time.
    pub fn local_time_label(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Parse a timestamp given as RFC 3339, the server's naive local format, or
/// epoch milliseconds.
pub fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            let naive = NaiveDateTime::parse_from_str(s, SERVER_TIMESTAMP_FORMAT).ok()?;
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
        serde_json::Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_server_payload() {
        let body = json!({
            "stocks": [{
                "symbol": "AAPL",
                "price": 176.12,
                "change": 1.12,
                "changePercent": 0.64,
                "volume": 1834221,
                "high": 177.0,
                "low": 175.2,
                "open": 175.0,
                "sma20": 0.0,
                "sma50": 0.0,
                "rsi": 50.0,
                "volatility": 0.0,
                "timestamp": "2024-03-01 14:05:09"
            }],
            "timestamp": "2024-03-01 14:05:09",
            "status": "success"
        });

        let response: QuotesResponse = serde_json::from_value(body).unwrap();
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.quotes.len(), 1);
        assert_eq!(snapshot.quotes[0].symbol, "AAPL");
        assert_eq!(snapshot.quotes[0].volume, 1_834_221);
        assert_eq!(snapshot.quotes[0].sma50, Some(0.0));
    }

    #[test]
    fn test_rejects_non_success_status() {
        let response = QuotesResponse {
            status: Some("error".to_string()),
            stocks: Some(vec![]),
            timestamp: Some(json!(0)),
        };
        assert!(matches!(
            response.into_snapshot(),
            Err(QuoteSourceError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_missing_status_or_stocks() {
        let no_status = QuotesResponse {
            status: None,
            stocks: Some(vec![]),
            timestamp: Some(json!(0)),
        };
        assert!(no_status.into_snapshot().is_err());

        let no_stocks = QuotesResponse {
            status: Some(SUCCESS_STATUS.to_string()),
            stocks: None,
            timestamp: Some(json!(0)),
        };
        assert!(no_stocks.into_snapshot().is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp(&json!("2024-03-01T14:05:09Z")).unwrap();
        assert_eq!(rfc.timestamp(), 1_709_301_909);

        let millis = parse_timestamp(&json!(1_709_301_909_000_i64)).unwrap();
        assert_eq!(millis, rfc);

        assert!(parse_timestamp(&json!("2024-03-01 14:05:09")).is_some());
        assert!(parse_timestamp(&json!("yesterday")).is_none());
        assert!(parse_timestamp(&json!(true)).is_none());
    }

    #[test]
    fn test_is_positive_includes_flat() {
        let body = json!({
            "symbol": "FLAT", "price": 1.0, "open": 1.0, "high": 1.0, "low": 1.0,
            "volume": 0, "change": 0.0, "changePercent": 0.0, "sma20": 1.0, "rsi": 50.0
        });
        let quote: Quote = serde_json::from_value(body).unwrap();
        assert!(quote.is_positive());
        assert_eq!(quote.timestamp, None);
    }

    fn sample(symbol: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price: 10.0,
            open: 9.5,
            high: 11.0,
            low: 9.0,
            volume: 1000,
            change: 0.5,
            change_percent: 5.0,
            sma20: 9.8,
            rsi: 55.0,
            sma50: None,
            volatility: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_missing_or_bad_timestamp_uses_receipt_time() {
        for timestamp in [None, Some(json!("not a date"))] {
            let before = Utc::now();
            let response = QuotesResponse {
                status: Some(SUCCESS_STATUS.to_string()),
                stocks: Some(vec![sample("AAA")]),
                timestamp,
            };
            let snapshot = response.into_snapshot().unwrap();
            assert_eq!(snapshot.quotes.len(), 1);
            assert!(snapshot.timestamp >= before);
            assert!(snapshot.timestamp <= Utc::now());
        }
    }

    #[test]
    fn test_clean_quotes_have_no_anomalies() {
        assert!(find_anomalies(&[sample("AAA"), sample("BBB")]).is_empty());
    }

    #[test]
    fn test_inconsistent_quote_is_flagged_but_accepted() {
        let mut bad = sample("BAD");
        bad.price = -5.0;
        bad.high = 1.0;
        bad.low = 8.0;
        bad.rsi = 150.0;
        bad.change = 1.0;
        bad.change_percent = -10.0;
        assert_eq!(
            bad.anomalies(),
            vec![
                QuoteAnomaly::NegativePrice,
                QuoteAnomaly::HighBelowLow,
                QuoteAnomaly::RsiOutOfRange,
                QuoteAnomaly::SignMismatch,
            ]
        );

        let response = QuotesResponse::success(vec![bad], Utc::now());
        assert_eq!(response.into_snapshot().unwrap().quotes.len(), 1);
    }

    #[test]
    fn test_duplicate_symbols_flag_later_occurrences() {
        let quotes = [sample("AAA"), sample("BBB"), sample("AAA")];
        assert_eq!(
            find_anomalies(&quotes),
            vec![(2, QuoteAnomaly::DuplicateSymbol)]
        );
    }
}
