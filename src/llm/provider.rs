//! Model provider abstraction and trait definitions
//!
//! Agents that rewrite text through a hosted model go through this interface,
//! so tests can swap in scripted providers without any network access.

use async_trait::async_trait;
use thiserror::Error;

/// A single text generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Create a request with no sampling overrides
    pub fn new<P: Into<String>, M: Into<String>>(prompt: P, model: M) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

/// Model provider trait for dependency injection and testing
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Generate text from the given request
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError>;
}

/// Model provider errors
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Provider returned no text")]
    EmptyResponse,
}
