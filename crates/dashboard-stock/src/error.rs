//! Error types for dashboard operations

use thiserror::Error;

/// Dashboard specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Symbol missing or blank
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Range token not one of the six supported ranges
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Provider has no history for the symbol/range
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance request failed, carrying the provider's message
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Analysis provider failure, shown as the provider reported it
    #[error(transparent)]
    Analysis(#[from] dashboard_llm::LLMError),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    PromptError(#[from] minijinja::Error),

    /// Chart data could not be built from the fetched history
    #[error("Chart error: {0}")]
    ChartError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, StockError>;

impl From<yahoo_finance_api::YahooError> for StockError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        StockError::YahooFinanceError(err.to_string())
    }
}

impl From<url::ParseError> for StockError {
    fn from(err: url::ParseError) -> Self {
        StockError::ConfigError(format!("invalid URL: {err}"))
    }
}
