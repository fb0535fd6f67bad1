//! DeepSeek connection profile

use std::time::Duration;

use faithcheck_core::FaithcheckError;

use crate::ResilientClientBuilder;

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEEPSEEK_CHAT_MODEL: &str = "deepseek-chat";
const DEEPSEEK_TIMEOUT: Duration = Duration::from_secs(30);

impl ResilientClientBuilder {
    /// Builder pointed at the DeepSeek API with the given credential.
    pub fn deepseek(api_key: impl Into<String>) -> Result<Self, FaithcheckError> {
        Ok(Self::new()
            .base_url(DEEPSEEK_BASE_URL)?
            .api_key(api_key)
            .timeout(DEEPSEEK_TIMEOUT))
    }
}
