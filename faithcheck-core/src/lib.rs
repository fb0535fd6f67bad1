mod error;
mod llm;
mod output_parsers;
mod retry;
mod runnable;
mod value;

pub use error::{FaithcheckError, ProviderError};
pub use llm::{ChatModel, CompletionRequest, CompletionResult, Message, Role};
pub use output_parsers::{extract_fenced_json, JsonOutputParser};
pub use retry::{retry_with_backoff, RetryPolicy, RetryState};
pub use runnable::Runnable;
pub use value::Value;
