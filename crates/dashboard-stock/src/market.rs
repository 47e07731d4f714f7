//! Market data types and the source trait the dashboard reads from

use crate::error::Result;
use crate::selection::TimeRange;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of price and volume data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Latest quote snapshot
///
/// Every field is optional: providers leave gaps and the page shows a
/// placeholder for each one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub currency: Option<String>,
    pub short_name: Option<String>,
}

/// Everything one fetch returns for a symbol and range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub range: TimeRange,
    /// Ordered by date, oldest first
    pub history: Vec<HistoryRecord>,
    pub quote: Quote,
}

/// Source of history and quote data
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the history window and the latest quote for `symbol`
    ///
    /// `symbol` is already normalized and non-empty.
    async fn fetch(&self, symbol: &str, range: TimeRange) -> Result<MarketSnapshot>;

    /// Provider name for logs
    fn name(&self) -> &str;
}
