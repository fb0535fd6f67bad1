use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaithcheckError {
    #[error("API client not initialized: no credential was supplied")]
    ClientUninitialized,
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetryExhausted {
        attempts: usize,
        last_error: ProviderError,
    },
    #[error("Upstream API fault: {0}")]
    UpstreamFault(ProviderError),
    #[error("Unexpected failure: {0}")]
    UnknownFailure(String),
    #[error("Unknown detection strategy '{0}'")]
    UnknownStrategy(String),
    #[error("Parsing failed on output '{output}': {reason}")]
    ParseFailed { output: String, reason: String },
    #[error("Invalid completion request: {0}")]
    InvalidRequest(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure of a single round trip to the chat-completion service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("rate limited (retry_after={retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Rate limits, timeouts and dropped connections are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. }
                | ProviderError::Timeout(_)
                | ProviderError::Connection(_)
        )
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ProviderError::Http { status, .. } if *status >= 500)
    }
}
