use async_trait::async_trait;

use crate::FaithcheckError;

/// A single async step that turns an input into an output or fails.
#[async_trait]
pub trait Runnable<Input: Send + 'static, Output: Send + 'static> {
    async fn invoke(&self, input: Input) -> Result<Output, FaithcheckError>;
}
