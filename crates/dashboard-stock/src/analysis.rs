//! Natural-language analysis of a symbol from a chat-completion provider

use crate::config::AnalysisSettings;
use crate::error::{Result, StockError};
use crate::prompts::{Language, analysis_prompt_pair};
use async_trait::async_trait;
use dashboard_llm::providers::{PerplexityConfig, PerplexityProvider};
use dashboard_llm::{CompletionRequest, LLMProvider, Message};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Markdown analysis for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub symbol: String,
    /// First completion's content, unmodified
    pub markdown: String,
    /// Source links the provider attached, if any
    pub citations: Vec<String>,
}

/// Something that can write an analysis for a symbol
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Produce the analysis for an already normalized, non-empty symbol
    async fn analyze(&self, symbol: &str) -> Result<Analysis>;
}

/// Analysis client backed by an [`LLMProvider`]
///
/// Every request carries exactly two messages: the analyst persona as the
/// system message and the five-section prompt as the user message.
pub struct AnalysisClient {
    provider: Arc<dyn LLMProvider>,
    model: String,
    language: Language,
}

impl AnalysisClient {
    /// Create a client over any provider
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>, language: Language) -> Self {
        Self {
            provider,
            model: model.into(),
            language,
        }
    }

    /// Create a Perplexity-backed client from settings
    pub fn from_settings(settings: &AnalysisSettings) -> Result<Self> {
        let config = PerplexityConfig::new(settings.api_key.clone())
            .with_api_base(settings.api_base.clone())
            .with_timeout(settings.timeout.as_secs().max(1));
        let provider = PerplexityProvider::with_config(config)?;

        Ok(Self::new(
            Arc::new(provider),
            settings.model.clone(),
            settings.language,
        ))
    }

    /// Build the request sent for `symbol`
    pub fn build_request(&self, symbol: &str) -> Result<CompletionRequest> {
        let (system, user) = analysis_prompt_pair(self.language, symbol)?;

        Ok(CompletionRequest::builder(self.model.clone())
            .add_message(Message::system(system))
            .add_message(Message::user(user))
            .build())
    }
}

#[async_trait]
impl Analyst for AnalysisClient {
    #[instrument(skip(self), fields(provider = self.provider.name(), model = %self.model))]
    async fn analyze(&self, symbol: &str) -> Result<Analysis> {
        let symbol = crate::selection::normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(StockError::InvalidSymbol(symbol));
        }

        let request = self.build_request(&symbol)?;
        debug!(language = %self.language, "requesting analysis");

        let response = self.provider.complete(request).await?;
        info!(chars = response.message.content.len(), "analysis received");

        Ok(Analysis {
            symbol,
            markdown: response.message.content,
            citations: response.citations,
        })
    }
}
