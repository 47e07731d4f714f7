//! Yahoo Finance API client
//!
//! History comes from the chart endpoint for the selected range. The quote
//! combines the chart metadata with the ticker summary; when Yahoo refuses
//! the summary the quote is built from the chart alone.

use crate::config::MarketSettings;
use crate::error::{Result, StockError};
use crate::market::{HistoryRecord, MarketDataSource, MarketSnapshot, Quote};
use crate::selection::TimeRange;
use async_trait::async_trait;
use chrono::DateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    /// Holds the session cookie and crumb once the summary was requested
    connector: Mutex<yahoo::YahooConnector>,
}

impl YahooFinanceClient {
    /// Create a client from settings
    pub fn with_settings(settings: &MarketSettings) -> Result<Self> {
        let connector = match settings.timeout {
            Some(timeout) => yahoo::YahooConnector::builder().timeout(timeout).build()?,
            None => yahoo::YahooConnector::new()?,
        };

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    #[instrument(skip(self), fields(provider = "yahoo"))]
    async fn fetch(&self, symbol: &str, range: TimeRange) -> Result<MarketSnapshot> {
        let mut connector = self.connector.lock().await;

        let response = connector
            .get_quote_range(symbol, "1d", chart_range(range))
            .await?;
        let rows = response.quotes()?.iter().filter_map(record).collect();
        let history = history_rows(symbol, range, rows)?;
        let current_price: Option<f64> = response.metadata()?.regular_market_price.into();

        let summary = match connector.get_ticker_info(symbol).await {
            Ok(info) => info
                .quote_summary
                .and_then(|summary| summary.result)
                .and_then(|results| results.into_iter().next())
                .and_then(|data| data.summary_detail)
                .map(|detail| SummaryFields {
                    previous_close: detail.regular_market_previous_close.into(),
                    day_high: detail.regular_market_day_high.into(),
                    day_low: detail.regular_market_day_low.into(),
                    market_cap: detail.market_cap.map(|cap| cap as f64),
                }),
            Err(e) => {
                warn!(error = %e, "ticker summary refused");
                None
            }
        };
        drop(connector);

        if summary.is_none() {
            warn!("quote built from the chart alone");
        }
        let quote = quote_from(current_price, &history, summary);

        info!(rows = history.len(), "market data fetched");
        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            range,
            history,
            quote,
        })
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Yahoo has no `1wk` range; five trading days covers one week
fn chart_range(range: TimeRange) -> &'static str {
    match range {
        TimeRange::OneWeek => "5d",
        other => other.period(),
    }
}

/// Daily bars are stamped at the session open, so the UTC date is the trading day
fn record(bar: &yahoo::Quote) -> Option<HistoryRecord> {
    let date = DateTime::from_timestamp(bar.timestamp as i64, 0)?.date_naive();
    Some(HistoryRecord {
        date,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    })
}

/// Order by date and keep one row per day
///
/// While a session is open Yahoo appends a live bar which can share its date
/// with the last daily bar; the later one wins.
fn history_rows(symbol: &str, range: TimeRange, mut rows: Vec<HistoryRecord>) -> Result<Vec<HistoryRecord>> {
    let returned = rows.len();
    rows.sort_by_key(|row| row.date);

    let mut history: Vec<HistoryRecord> = Vec::with_capacity(rows.len());
    for row in rows {
        match history.last_mut() {
            Some(last) if last.date == row.date => *last = row,
            _ => history.push(row),
        }
    }

    if history.is_empty() {
        return Err(StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: format!("no price history for {}", range.label()),
        });
    }

    debug!(returned, kept = history.len(), "history parsed");
    Ok(history)
}

/// The ticker summary fields the quote reads
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct SummaryFields {
    previous_close: Option<f64>,
    day_high: Option<f64>,
    day_low: Option<f64>,
    market_cap: Option<f64>,
}

/// Summary values first, the latest two history rows for whatever is missing
///
/// Market cap only comes from the summary.
fn quote_from(current_price: Option<f64>, history: &[HistoryRecord], summary: Option<SummaryFields>) -> Quote {
    let summary = summary.unwrap_or_default();
    let last = history.last();
    let before_last = history.len().checked_sub(2).and_then(|i| history.get(i));

    Quote {
        current_price: finite(current_price.or_else(|| last.map(|row| row.close))),
        previous_close: finite(summary.previous_close.or_else(|| before_last.map(|row| row.close))),
        market_cap: finite(summary.market_cap),
        day_high: finite(summary.day_high.or_else(|| last.map(|row| row.high))),
        day_low: finite(summary.day_low.or_else(|| last.map(|row| row.low))),
        currency: None,
        short_name: None,
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, close: f64) -> HistoryRecord {
        HistoryRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_week_uses_five_day_range() {
        assert_eq!(chart_range(TimeRange::OneWeek), "5d");
        assert_eq!(chart_range(TimeRange::SixMonths), "6mo");
        assert_eq!(chart_range(TimeRange::TwoYears), "2y");
    }

    #[test]
    fn test_history_rows_sorted_one_per_day() {
        let rows = vec![row(5, 107.0), row(3, 104.0), row(4, 105.0), row(5, 108.5)];

        let history = history_rows("AAPL", TimeRange::OneWeek, rows).unwrap();
        let closes: Vec<f64> = history.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![104.0, 105.0, 108.5]);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn test_history_rows_empty_is_unavailable() {
        let err = history_rows("ZZZZ", TimeRange::OneYear, Vec::new()).unwrap_err();
        assert!(matches!(err, StockError::DataUnavailable { .. }));
        assert_eq!(err.to_string(), "Data not available for ZZZZ: no price history for 1 year");
    }

    #[test]
    fn test_quote_prefers_summary() {
        let history = vec![row(3, 140.0), row(4, 148.0)];
        let summary = SummaryFields {
            previous_close: Some(145.0),
            day_high: Some(152.0),
            day_low: Some(140.0),
            market_cap: Some(2_345_678_901.0),
        };

        let quote = quote_from(Some(150.0), &history, Some(summary));
        assert_eq!(quote.current_price, Some(150.0));
        assert_eq!(quote.previous_close, Some(145.0));
        assert_eq!(quote.day_high, Some(152.0));
        assert_eq!(quote.day_low, Some(140.0));
        assert_eq!(quote.market_cap, Some(2_345_678_901.0));
    }

    #[test]
    fn test_quote_from_chart_alone() {
        let history = vec![row(3, 140.0), row(4, 148.0)];

        let quote = quote_from(Some(150.0), &history, None);
        assert_eq!(quote.current_price, Some(150.0));
        assert_eq!(quote.previous_close, Some(140.0));
        assert_eq!(quote.day_high, Some(150.0));
        assert_eq!(quote.day_low, Some(146.0));
        assert_eq!(quote.market_cap, None);
    }

    #[test]
    fn test_quote_fills_summary_gaps() {
        let history = vec![row(4, 148.0)];
        let summary = SummaryFields {
            day_high: Some(f64::NAN),
            market_cap: Some(1.0e9),
            ..SummaryFields::default()
        };

        let quote = quote_from(None, &history, Some(summary));
        assert_eq!(quote.current_price, Some(148.0));
        assert_eq!(quote.previous_close, None);
        assert_eq!(quote.day_high, None);
        assert_eq!(quote.day_low, Some(146.0));
        assert_eq!(quote.market_cap, Some(1.0e9));
    }

    #[test]
    fn test_client_builds_with_and_without_timeout() {
        assert!(YahooFinanceClient::with_settings(&MarketSettings::default()).is_ok());

        let settings = MarketSettings {
            timeout: Some(std::time::Duration::from_secs(5)),
        };
        assert!(YahooFinanceClient::with_settings(&settings).is_ok());
    }
}
