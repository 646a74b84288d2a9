//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction over the external
//! generation API, allowing the real Gemini backend to be swapped for
//! mocks in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// A single conversation turn sent to the provider.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Base64-encoded file payload with its MIME type, bundled into a
/// multimodal request and discarded after the call.
#[derive(Debug, Clone)]
pub struct GenerativePart {
    pub data: String,
    pub mime_type: String,
}

/// Result of a provider call.
pub struct ProviderResponse {
    /// Generated text, if the provider returned any.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Error,
}

/// Trait for text/multimodal generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a response from the conversation, optionally with one
    /// inline media part attached to the final message.
    async fn generate(
        &self,
        messages: &[ChatMessage],
        media: Option<&GenerativePart>,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
