//! Configuration for the dashboard clients
//!
//! The configuration is read once at start-up and handed to the client
//! constructors; nothing reads the environment after that.

use crate::error::{Result, StockError};
use crate::prompts::Language;
use dashboard_llm::providers::perplexity::DEFAULT_PERPLEXITY_API_BASE;
use dashboard_utils::{EnvSource, ProcessEnv};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Value used when `PERPLEXITY_API_KEY` is absent; the provider rejects it
pub const API_KEY_PLACEHOLDER: &str = "your-api-key-here";

/// Default chat model
pub const DEFAULT_MODEL: &str = "sonar";

const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the analysis provider
#[derive(Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Bearer token
    pub api_key: String,
    /// Chat-completions base URL
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
    /// Prompt language
    pub language: Language,
}

impl fmt::Debug for AnalysisSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("language", &self.language)
            .finish()
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            api_base: DEFAULT_PERPLEXITY_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_ANALYSIS_TIMEOUT,
            language: Language::default(),
        }
    }
}

/// Settings for the market-data provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSettings {
    /// Request timeout; `None` waits for the transport
    pub timeout: Option<Duration>,
}

/// Configuration for the whole dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub analysis: AnalysisSettings,
    pub market: MarketSettings,
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&ProcessEnv)
    }

    /// Read configuration from any variable source
    ///
    /// | variable | default |
    /// |---|---|
    /// | `PERPLEXITY_API_KEY` | `your-api-key-here` |
    /// | `PERPLEXITY_API_BASE` | `https://api.perplexity.ai` |
    /// | `PERPLEXITY_MODEL` | `sonar` |
    /// | `DASHBOARD_LANGUAGE` | `en` |
    /// | `DASHBOARD_MARKET_TIMEOUT_SECS` | unset (no timeout) |
    pub fn from_lookup(env: &impl EnvSource) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(key) = env.var("PERPLEXITY_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Some(base) = env.var("PERPLEXITY_API_BASE") {
            builder = builder.api_base(base);
        }
        if let Some(model) = env.var("PERPLEXITY_MODEL") {
            builder = builder.model(model);
        }
        if let Some(lang) = env.var("DASHBOARD_LANGUAGE") {
            builder = builder.language(lang.parse()?);
        }
        if let Some(secs) = env.var("DASHBOARD_MARKET_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                StockError::ConfigError(format!(
                    "DASHBOARD_MARKET_TIMEOUT_SECS must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            builder = builder.market_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Whether the analysis key is still the placeholder
    pub fn has_placeholder_key(&self) -> bool {
        self.analysis.api_key == API_KEY_PLACEHOLDER
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.analysis.model.trim().is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }

        if self.analysis.timeout.is_zero() {
            return Err(StockError::ConfigError(
                "analysis timeout must be greater than 0".to_string(),
            ));
        }

        if self.market.timeout.is_some_and(|t| t.is_zero()) {
            return Err(StockError::ConfigError(
                "market timeout must be greater than 0".to_string(),
            ));
        }

        Url::parse(&self.analysis.api_base)?;

        Ok(())
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    model: Option<String>,
    analysis_timeout: Option<Duration>,
    language: Option<Language>,
    market_timeout: Option<Duration>,
}

impl DashboardConfigBuilder {
    /// Set the analysis API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the analysis API base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the analysis model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the analysis request timeout
    pub fn analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = Some(timeout);
        self
    }

    /// Set the prompt language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set a market-data request timeout
    pub fn market_timeout(mut self, timeout: Duration) -> Self {
        self.market_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let analysis_defaults = AnalysisSettings::default();
        let market_defaults = MarketSettings::default();

        let config = DashboardConfig {
            analysis: AnalysisSettings {
                api_key: self.api_key.unwrap_or(analysis_defaults.api_key),
                api_base: self.api_base.unwrap_or(analysis_defaults.api_base),
                model: self.model.unwrap_or(analysis_defaults.model),
                timeout: self.analysis_timeout.unwrap_or(analysis_defaults.timeout),
                language: self.language.unwrap_or(analysis_defaults.language),
            },
            market: MarketSettings {
                timeout: self.market_timeout.or(market_defaults.timeout),
            },
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.analysis.model, "sonar");
        assert_eq!(config.analysis.timeout, Duration::from_secs(30));
        assert_eq!(config.market.timeout, None);
        assert!(config.has_placeholder_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_uses_placeholder() {
        let config = DashboardConfig::from_lookup(&lookup(&[])).unwrap();
        assert_eq!(config.analysis.api_key, API_KEY_PLACEHOLDER);
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let config = DashboardConfig::from_lookup(&lookup(&[
            ("PERPLEXITY_API_KEY", "pplx-123"),
            ("PERPLEXITY_MODEL", "sonar-pro"),
            ("DASHBOARD_LANGUAGE", "zh"),
            ("DASHBOARD_MARKET_TIMEOUT_SECS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.analysis.api_key, "pplx-123");
        assert_eq!(config.analysis.model, "sonar-pro");
        assert_eq!(config.analysis.language, Language::Chinese);
        assert_eq!(config.market.timeout, Some(Duration::from_secs(20)));
        assert!(!config.has_placeholder_key());
    }

    #[test]
    fn test_bad_timeout_variable() {
        let result =
            DashboardConfig::from_lookup(&lookup(&[("DASHBOARD_MARKET_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(StockError::ConfigError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(DashboardConfig::builder().model("  ").build().is_err());
        assert!(
            DashboardConfig::builder()
                .analysis_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(DashboardConfig::builder().api_base("not a url").build().is_err());
        assert!(
            DashboardConfig::builder()
                .market_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = DashboardConfig::builder().api_key("pplx-secret").build().unwrap();
        assert!(!format!("{config:?}").contains("pplx-secret"));
    }
}
