use async_trait::async_trait;
use faithcheck_core::ProviderError;

use crate::openai_compatible::{ChatCompletionRequest, ChatCompletionResponse};

/// One round trip to a chat-completion service, without retries.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Lightweight capability listing used as a connectivity probe.
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;
}
