//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LLMError {
    /// The provider answered with a non-success status
    ///
    /// The body is kept when the provider sent one so it can be shown
    /// next to the status.
    #[error(
        "HTTP {status}{}",
        body.as_deref().map(|b| format!(": {b}")).unwrap_or_default()
    )]
    HttpStatus {
        /// Status code returned by the provider
        status: u16,
        /// Response body, if non-empty
        body: Option<String>,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network, TLS or timeout error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response did not have the expected shape
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// Build an [`LLMError::HttpStatus`], dropping blank bodies
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        Self::HttpStatus { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_with_body() {
        let err = LLMError::http_status(401, r#"{"error":"invalid api key"}"#);
        assert_eq!(err.to_string(), r#"HTTP 401: {"error":"invalid api key"}"#);
    }

    #[test]
    fn test_http_status_without_body() {
        let err = LLMError::http_status(502, "  \n");
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(matches!(err, LLMError::HttpStatus { body: None, .. }));
    }

    #[test]
    fn test_unexpected_response_display() {
        let err = LLMError::UnexpectedResponse("{}".to_string());
        assert_eq!(err.to_string(), "Unexpected response format: {}");
    }
}
