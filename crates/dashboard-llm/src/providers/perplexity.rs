//! Perplexity provider implementation
//!
//! Perplexity exposes an OpenAI-compatible chat-completions endpoint.
//! See: https://docs.perplexity.ai/api-reference/chat-completions
//!
//! # Example
//!
//! ```no_run
//! use dashboard_llm::{CompletionRequest, LLMProvider, Message};
//! use dashboard_llm::providers::{PerplexityConfig, PerplexityProvider};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PerplexityConfig::new("pplx-...").with_timeout(30);
//! let provider = PerplexityProvider::with_config(config)?;
//!
//! let request = CompletionRequest::builder("sonar")
//!     .add_message(Message::system("You are a stock analyst."))
//!     .add_message(Message::user("Analyze AAPL"))
//!     .build();
//!
//! let response = provider.complete(request).await?;
//! println!("{}", response.message.text());
//! # Ok(())
//! # }
//! ```

use crate::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default Perplexity API base URL
pub const DEFAULT_PERPLEXITY_API_BASE: &str = "https://api.perplexity.ai";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Perplexity provider
#[derive(Clone)]
pub struct PerplexityConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL; `/chat/completions` is appended
    pub api_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PerplexityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PerplexityConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_PERPLEXITY_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set custom API base URL
    ///
    /// Any OpenAI-compatible gateway works, as does a local mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// Perplexity chat-completion provider
pub struct PerplexityProvider {
    client: Client,
    config: PerplexityConfig,
}

impl PerplexityProvider {
    /// Create a new provider with custom configuration
    pub fn with_config(config: PerplexityConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(LLMError::ConfigurationError(
                "timeout must be greater than 0".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl LLMProvider for PerplexityProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }

        debug!(messages = request.messages.len(), "sending chat completion");

        let response = self
            .client
            .post(self.config.endpoint())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "provider returned error status");
            return Err(LLMError::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let completion = parse_completion(&body)?;

        if let Some(usage) = completion.usage {
            debug!(
                "Received response - finish_reason: {:?}, tokens: {}/{}",
                completion.finish_reason, usage.input_tokens, usage.output_tokens
            );
        }

        Ok(completion)
    }

    fn name(&self) -> &'static str {
        "perplexity"
    }
}

// ============================================================================
// Wire response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Extract the first choice's content from a response body
///
/// A body that is not JSON, or that lacks `choices[0].message.content`, is an
/// [`LLMError::UnexpectedResponse`] carrying the whole payload.
fn parse_completion(body: &str) -> Result<CompletionResponse> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LLMError::UnexpectedResponse(format!("{e}; body: {body}")))?;

    let mut choices = parsed.choices.into_iter();
    let Some(choice) = choices.next() else {
        return Err(LLMError::UnexpectedResponse(body.to_string()));
    };
    let Some(content) = choice.message.and_then(|m| m.content) else {
        return Err(LLMError::UnexpectedResponse(body.to_string()));
    };

    Ok(CompletionResponse {
        message: Message::assistant(content),
        finish_reason: choice.finish_reason,
        usage: parsed.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        }),
        citations: parsed.citations,
    })
}
