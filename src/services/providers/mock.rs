//! Mock provider implementations for testing.

use super::{
    ChatMessage, FinishReason, GenerativePart, ProviderError, ProviderResponse, TextProvider,
};
use async_trait::async_trait;

/// Mock text provider for testing. Echoes the last message back unless
/// constructed with a canned reply.
pub struct MockTextProvider {
    enabled: bool,
    canned: Option<String>,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            canned: None,
        }
    }

    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            canned: Some(text.into()),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        _media: Option<&GenerativePart>,
    ) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        let text = match &self.canned {
            Some(canned) => canned.clone(),
            None => {
                let last = messages
                    .last()
                    .map(|m| m.content.as_str())
                    .unwrap_or_default();
                format!("Mock response for: {}", last)
            }
        };

        let input_tokens: i32 = messages.iter().map(|m| m.content.len() as i32 / 4).sum();

        Ok(ProviderResponse {
            text: Some(text),
            input_tokens,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}

/// Provider that always fails, for exercising error mapping.
pub struct FailingTextProvider {
    message: String,
}

impl FailingTextProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TextProvider for FailingTextProvider {
    async fn generate(
        &self,
        _messages: &[ChatMessage],
        _media: Option<&GenerativePart>,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::ApiError(self.message.clone()))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Err(ProviderError::ApiError(self.message.clone()))
    }
}
