//! Chart figures in a plotly-like shape

use crate::error::{Result, StockError};
use crate::market::HistoryRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Open/high/low/close chart over the history window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickFigure {
    /// Always `candlestick`
    #[serde(rename = "type")]
    pub chart_type: String,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl CandlestickFigure {
    /// Build the figure from the drawable rows
    ///
    /// Rows with a non-finite price or a low above the high are left out of
    /// the chart; the history table still shows them. Fails only when no row
    /// can be drawn.
    pub fn from_history(symbol: &str, currency: Option<&str>, history: &[HistoryRecord]) -> Result<Self> {
        let rows: Vec<&HistoryRecord> = history.iter().filter(|row| drawable(row)).collect();
        if rows.is_empty() {
            return Err(StockError::ChartError(format!(
                "none of the {} rows has drawable prices",
                history.len()
            )));
        }
        if rows.len() < history.len() {
            warn!(
                symbol,
                skipped = history.len() - rows.len(),
                "rows left out of the price chart"
            );
        }

        Ok(Self {
            chart_type: "candlestick".to_string(),
            title: format!("{symbol} price"),
            x_title: "Date".to_string(),
            y_title: format!("Price ({})", currency.unwrap_or("USD")),
            x: rows.iter().map(|r| r.date).collect(),
            open: rows.iter().map(|r| r.open).collect(),
            high: rows.iter().map(|r| r.high).collect(),
            low: rows.iter().map(|r| r.low).collect(),
            close: rows.iter().map(|r| r.close).collect(),
        })
    }

    /// Number of candles
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Lowest low and highest high
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let low = self.low.iter().copied().reduce(f64::min)?;
        let high = self.high.iter().copied().reduce(f64::max)?;
        Some((low, high))
    }
}

fn drawable(row: &HistoryRecord) -> bool {
    let prices = [row.open, row.high, row.low, row.close];
    prices.iter().all(|v| v.is_finite()) && row.low <= row.high
}

/// Volume bars over the history window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarFigure {
    /// Always `bar`
    #[serde(rename = "type")]
    pub chart_type: String,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<u64>,
}

impl BarFigure {
    pub fn volume(symbol: &str, history: &[HistoryRecord]) -> Self {
        Self {
            chart_type: "bar".to_string(),
            title: format!("{symbol} volume"),
            x_title: "Date".to_string(),
            y_title: "Volume".to_string(),
            x: history.iter().map(|r| r.date).collect(),
            y: history.iter().map(|r| r.volume).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(day: u32, open: f64, high: f64, low: f64, close: f64) -> HistoryRecord {
        HistoryRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            open,
            high,
            low,
            close,
            volume: u64::from(day) * 1_000,
        }
    }

    #[test]
    fn test_candlestick_from_history() {
        let history = vec![row(3, 10.0, 12.0, 9.0, 11.0), row(4, 11.0, 13.0, 10.5, 12.5)];
        let figure = CandlestickFigure::from_history("AAPL", None, &history).unwrap();

        assert_eq!(figure.title, "AAPL price");
        assert_eq!(figure.y_title, "Price (USD)");
        assert_eq!(figure.len(), 2);
        assert_eq!(figure.close, vec![11.0, 12.5]);
        assert_eq!(figure.price_bounds(), Some((9.0, 13.0)));

        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["type"], json!("candlestick"));
        assert_eq!(value["x"][0], json!("2024-06-03"));
    }

    #[test]
    fn test_candlestick_skips_bad_rows() {
        let history = vec![
            row(3, 10.0, 12.0, 9.0, 11.0),
            row(4, 11.0, 10.0, 12.0, 11.5),
            row(5, f64::NAN, 12.0, 9.0, 11.0),
            row(6, 11.0, 13.0, 10.5, 12.5),
        ];
        let figure = CandlestickFigure::from_history("AAPL", None, &history).unwrap();

        assert_eq!(figure.len(), 2);
        assert_eq!(
            figure.x,
            vec![history[0].date, history[3].date]
        );
        assert_eq!(figure.close, vec![11.0, 12.5]);
    }

    #[test]
    fn test_candlestick_needs_one_drawable_row() {
        let history = vec![row(3, 10.0, 9.0, 12.0, 11.0), row(4, f64::INFINITY, 12.0, 9.0, 11.0)];
        assert!(matches!(
            CandlestickFigure::from_history("AAPL", None, &history),
            Err(StockError::ChartError(_))
        ));
    }

    #[test]
    fn test_volume_figure() {
        let history = vec![row(3, 10.0, 12.0, 9.0, 11.0)];
        let figure = BarFigure::volume("TSLA", &history);
        assert_eq!(figure.title, "TSLA volume");
        assert_eq!(figure.y, vec![3_000]);
        assert_eq!(serde_json::to_value(&figure).unwrap()["type"], json!("bar"));
    }
}
