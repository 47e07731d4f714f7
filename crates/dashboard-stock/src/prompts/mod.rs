//! Prompt templates for the stock analysis request
//!
//! Two templates make up every request:
//! - `system`: the analyst persona
//! - `user`: the five-section analysis request, parameterised by symbol
//!
//! Both exist in English and Chinese and are rendered with MiniJinja.

mod system;
mod user;

pub use system::analyst_persona;
pub use user::analyze_stock_prompt;

use crate::error::{Result, StockError};
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the prompts are written in
///
/// The model answers in the language of the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    English,
    /// Chinese (Simplified)
    Chinese,
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "zh" | "chinese" | "中文" | "zh-cn" | "zh-hans" => Ok(Language::Chinese),
            other => Err(StockError::ConfigError(format!(
                "unsupported language {other:?}, expected en or zh"
            ))),
        }
    }
}

/// A prompt with one English and one Chinese variant
#[derive(Debug, Clone, Copy)]
pub struct BilingualTemplate {
    name: &'static str,
    english: &'static str,
    chinese: &'static str,
}

impl BilingualTemplate {
    /// Create a template from its two variants
    pub const fn new(name: &'static str, english: &'static str, chinese: &'static str) -> Self {
        Self {
            name,
            english,
            chinese,
        }
    }

    /// Raw template text for a language
    pub fn raw(&self, lang: Language) -> &'static str {
        match lang {
            Language::English => self.english,
            Language::Chinese => self.chinese,
        }
    }

    /// Render the template for `lang` with `ctx`
    ///
    /// The template is registered under its name, so render errors say
    /// which prompt failed.
    pub fn render<S: Serialize>(&self, lang: Language, ctx: S) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(self.name, self.raw(lang))?;
        let rendered = env.get_template(self.name)?.render(ctx)?;
        Ok(rendered)
    }
}

/// Render the system and user messages for one analysis request
pub fn analysis_prompt_pair(lang: Language, symbol: &str) -> Result<(String, String)> {
    let system = analyst_persona().render(lang, ())?;
    let user = analyze_stock_prompt().render(lang, minijinja::context! { symbol })?;
    Ok((system, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_language_parsing() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert_eq!("中文".parse::<Language>().unwrap(), Language::Chinese);
        assert!("ja".parse::<Language>().is_err());
    }

    #[test]
    fn test_bilingual_render() {
        let template = BilingualTemplate::new("greeting", "Hello, {{ name }}!", "你好，{{ name }}！");

        assert_eq!(
            template.render(Language::English, context! { name => "AAPL" }).unwrap(),
            "Hello, AAPL!"
        );
        assert_eq!(
            template.render(Language::Chinese, context! { name => "AAPL" }).unwrap(),
            "你好，AAPL！"
        );
    }

    #[test]
    fn test_render_error_names_template() {
        let broken = BilingualTemplate::new("broken_prompt", "{{ name", "{{ name");
        let err = broken.render(Language::English, ()).unwrap_err();
        assert!(err.to_string().contains("broken_prompt"));
    }

    #[test]
    fn test_all_prompts_render_in_both_languages() {
        for lang in [Language::English, Language::Chinese] {
            assert!(!analyst_persona().render(lang, ()).unwrap().is_empty());
            let user = analyze_stock_prompt()
                .render(lang, context! { symbol => "NVDA" })
                .unwrap();
            assert!(user.contains("NVDA"));
        }
    }
}
