//! Chat-completion layer for stock-dashboard
//!
//! This crate provides provider-agnostic types for talking to a
//! chat-completion endpoint. It includes:
//!
//! - Message types (`system` / `user` / `assistant` roles)
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - A Perplexity provider, usable with any OpenAI-compatible API

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
