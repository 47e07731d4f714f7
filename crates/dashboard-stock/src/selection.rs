//! User selection: symbol and time range

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol shown when the user has not typed one
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Symbols suggested in help text and the interactive banner
pub const EXAMPLE_SYMBOLS: [(&str, &str); 5] = [
    ("Apple", "AAPL"),
    ("Google", "GOOGL"),
    ("Tesla", "TSLA"),
    ("Microsoft", "MSFT"),
    ("NVIDIA", "NVDA"),
];

/// History window offered to the user
///
/// Each variant has a distinct label and exactly one provider period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    OneWeek,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
}

impl TimeRange {
    /// All ranges in display order
    pub const ALL: [TimeRange; 6] = [
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::TwoYears,
    ];

    /// Label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Self::OneWeek => "1 week",
            Self::OneMonth => "1 month",
            Self::ThreeMonths => "3 months",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
            Self::TwoYears => "2 years",
        }
    }

    /// Provider period token
    pub fn period(self) -> &'static str {
        match self {
            Self::OneWeek => "1wk",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = StockError;

    /// Accepts a label (`3 months`, `3months`) or a period token (`3mo`)
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|range| {
                let label: String = range.label().split_whitespace().collect();
                wanted == label || wanted == range.period()
            })
            .ok_or_else(|| StockError::InvalidRange(s.trim().to_string()))
    }
}

/// What the user asked to see: one symbol over one range
///
/// Built once per render and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Upper-cased, trimmed ticker; may be empty
    pub symbol: String,
    /// Requested history window
    pub range: TimeRange,
}

impl Selection {
    /// Normalize raw input into a selection
    pub fn new(symbol: &str, range: TimeRange) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            range,
        }
    }

    /// Whether there is a symbol to fetch
    pub fn has_symbol(&self) -> bool {
        !self.symbol.is_empty()
    }

    /// Parse an interactive input line: `SYMBOL [RANGE]`
    ///
    /// A missing range keeps `current_range`.
    pub fn parse_line(line: &str, current_range: TimeRange) -> Result<Self> {
        let line = line.trim();
        let (symbol, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(s, r)| (s, r.trim()));

        let range = if rest.is_empty() {
            current_range
        } else {
            rest.parse()?
        };

        Ok(Self::new(symbol, range))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL, TimeRange::default())
    }
}

/// Trim and upper-case a ticker
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}
