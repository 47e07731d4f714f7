//! Presentation orchestrator
//!
//! [`Dashboard::render`] turns a [`Selection`] into a [`Page`]: fetch the
//! market data, derive the metrics, build the figures and the history
//! table, then ask for the analysis. Every failure ends up as a section on
//! the page; `render` itself never fails.

pub mod figure;
pub mod metrics;
pub mod page;

pub use figure::{BarFigure, CandlestickFigure};
pub use metrics::{PLACEHOLDER, quote_metrics};
pub use page::{Metric, PAGE_TITLE, Page, RETRY_HINT, RenderStatus, Section};

use crate::analysis::{Analysis, AnalysisClient, Analyst};
use crate::api::YahooFinanceClient;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::market::MarketDataSource;
use crate::selection::Selection;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Builds pages from a market-data source and an optional analyst
pub struct Dashboard {
    market: Arc<dyn MarketDataSource>,
    analyst: Option<Arc<dyn Analyst>>,
}

impl Dashboard {
    pub fn new(market: Arc<dyn MarketDataSource>, analyst: Option<Arc<dyn Analyst>>) -> Self {
        Self { market, analyst }
    }

    /// Yahoo market data plus Perplexity analysis
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let market = YahooFinanceClient::with_settings(&config.market)?;
        let analyst = AnalysisClient::from_settings(&config.analysis)?;
        Ok(Self::new(Arc::new(market), Some(Arc::new(analyst))))
    }

    /// Drop the analyst; pages end after the history table
    #[must_use]
    pub fn without_analysis(mut self) -> Self {
        self.analyst = None;
        self
    }

    /// Render one page for `selection`
    #[instrument(skip(self), fields(symbol = %selection.symbol, range = %selection.range))]
    pub async fn render(&self, selection: &Selection) -> Page {
        let mut page = Page::new(selection.clone());

        if let Err(e) = self.try_render(&mut page).await {
            error!(error = %e, "render aborted");
            page.fail(format!("Unexpected error: {e}"), Some(RETRY_HINT));
        }

        info!(status = ?page.status, sections = page.sections.len(), "page rendered");
        page
    }

    async fn try_render(&self, page: &mut Page) -> Result<()> {
        if !page.selection.has_symbol() {
            page.push(Section::Warning {
                message: "Please enter a stock symbol".to_string(),
            });
            page.status = RenderStatus::Idle;
            return Ok(());
        }

        let symbol = page.selection.symbol.clone();
        let range = page.selection.range;

        let snapshot = match self.market.fetch(&symbol, range).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(provider = self.market.name(), error = %e, "market data failed");
                page.fail(format!("Failed to fetch data: {e}"), None);
                return Ok(());
            }
        };

        if snapshot.history.is_empty() {
            page.fail(
                format!("No data available for {symbol} over {}", range.label()),
                Some(RETRY_HINT),
            );
            return Ok(());
        }

        page.push(Section::Metrics {
            metrics: quote_metrics(&snapshot.quote),
        });

        let candles = CandlestickFigure::from_history(
            &symbol,
            snapshot.quote.currency.as_deref(),
            &snapshot.history,
        )?;
        let volume = BarFigure::volume(&symbol, &snapshot.history);

        page.push(Section::Candlestick(candles));
        page.push(Section::Volume(volume));
        page.push(Section::History {
            rows: snapshot.history,
        });

        let Some(analyst) = &self.analyst else {
            page.push(Section::Info {
                message: "AI analysis skipped".to_string(),
            });
            page.status = RenderStatus::Rendered;
            return Ok(());
        };

        match analyst.analyze(&symbol).await {
            Ok(Analysis {
                markdown,
                citations,
                ..
            }) => {
                page.push(Section::Analysis {
                    markdown,
                    citations,
                });
                page.status = RenderStatus::Rendered;
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                page.fail(format!("Failed to get analysis: {e}"), None);
            }
        }

        Ok(())
    }
}
