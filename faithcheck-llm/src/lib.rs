mod client;
mod transport;

// OpenAI-compatible wire format and HTTP transport (always available)
pub mod openai_compatible;

// Provider presets (feature-gated)
pub mod providers;

pub use client::{ResilientClient, ResilientClientBuilder};
pub use faithcheck_core::{CompletionRequest, CompletionResult, Message, RetryPolicy, Role};
pub use openai_compatible::{ChatCompletionRequest, ChatCompletionResponse, HttpTransport};
pub use transport::ChatTransport;

#[cfg(feature = "deepseek")]
pub use providers::deepseek::{DEEPSEEK_BASE_URL, DEEPSEEK_CHAT_MODEL};
