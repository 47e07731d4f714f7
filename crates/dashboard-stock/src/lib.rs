//! Stock dashboard
//!
//! Fetches price history and a quote for one symbol, derives the headline
//! metrics, builds candlestick and volume figures, and asks a chat model
//! for a written analysis. The result is a [`Page`] value which a
//! [`PageRenderer`] turns into terminal text or JSON.
//!
//! - `api`: Yahoo Finance client ([`MarketDataSource`])
//! - `analysis`: analysis client over any [`dashboard_llm::LLMProvider`]
//! - `dashboard`: the orchestrator and the page model
//! - `render`: text and JSON output
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard_stock::{Dashboard, DashboardConfig, PageRenderer, Selection, TextRenderer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::from_env()?;
//!     let dashboard = Dashboard::from_config(&config)?;
//!
//!     let page = dashboard.render(&Selection::new("nvda", "3 months".parse()?)).await;
//!     print!("{}", TextRenderer::default().render(&page)?);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod market;
pub mod prompts;
pub mod render;
pub mod selection;

pub use analysis::{Analysis, AnalysisClient, Analyst};
pub use api::YahooFinanceClient;
pub use config::{AnalysisSettings, DashboardConfig, DashboardConfigBuilder, MarketSettings};
pub use dashboard::{Dashboard, Metric, Page, RenderStatus, Section};
pub use error::{Result, StockError};
pub use market::{HistoryRecord, MarketDataSource, MarketSnapshot, Quote};
pub use prompts::Language;
pub use render::{JsonRenderer, PageRenderer, RenderOptions, TextRenderer};
pub use selection::{DEFAULT_SYMBOL, EXAMPLE_SYMBOLS, Selection, TimeRange};

/// Errors from the analysis provider
pub use dashboard_llm::LLMError as AnalysisError;
