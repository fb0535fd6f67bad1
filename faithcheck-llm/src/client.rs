use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use url::Url;

use faithcheck_core::{
    retry_with_backoff, CompletionRequest, CompletionResult, FaithcheckError, ProviderError,
    RetryPolicy, Runnable,
};

use crate::openai_compatible::{ChatCompletionRequest, ChatCompletionResponse, HttpTransport};
use crate::ChatTransport;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat-completion client with bounded exponential backoff.
///
/// Holds one connection profile for its whole life. A client built without a
/// credential still exists but refuses every call with
/// [`FaithcheckError::ClientUninitialized`].
pub struct ResilientClient<T = HttpTransport> {
    transport: Option<T>,
    retry: RetryPolicy,
}

impl<T> fmt::Debug for ResilientClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResilientClient")
            .field("initialized", &self.transport.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

impl ResilientClient<HttpTransport> {
    pub fn builder() -> ResilientClientBuilder {
        ResilientClientBuilder::new()
    }
}

impl<T: ChatTransport> ResilientClient<T> {
    pub fn with_transport(transport: T, retry: RetryPolicy) -> Self {
        Self {
            transport: Some(transport),
            retry,
        }
    }

    /// A client with no usable credential.
    pub fn uninitialized(retry: RetryPolicy) -> Self {
        Self {
            transport: None,
            retry,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.transport.is_some()
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Probes the service with a model listing. Never fails; any error is
    /// logged and reported as `false`.
    pub async fn check_connection(&self) -> bool {
        let Some(transport) = &self.transport else {
            tracing::warn!("connection check failed: client not initialized");
            return false;
        };

        match transport.list_models().await {
            Ok(models) => {
                tracing::info!(models = models.len(), "API connection verified");
                true
            }
            Err(ProviderError::Http { status, message }) if status == 401 || status == 403 => {
                tracing::warn!(status, %message, "API key rejected");
                false
            }
            Err(error) => {
                tracing::warn!(%error, "API connection failed");
                false
            }
        }
    }

    pub async fn create_chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, FaithcheckError> {
        let Some(transport) = &self.transport else {
            tracing::warn!("cannot create completion: client not initialized");
            return Err(FaithcheckError::ClientUninitialized);
        };

        let body = ChatCompletionRequest::from(request);
        let response = retry_with_backoff(&self.retry, |attempt| {
            tracing::debug!(
                attempt,
                model = %body.model,
                structured = body.response_format.is_some(),
                "sending chat completion"
            );
            transport.chat_completion(&body)
        })
        .await?;

        into_result(response)
    }
}

fn into_result(response: ChatCompletionResponse) -> Result<CompletionResult, FaithcheckError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        FaithcheckError::UnknownFailure("no choices returned".to_string())
    })?;

    Ok(CompletionResult {
        content: choice.message.content.unwrap_or_default(),
        total_tokens: response.usage.map(|u| u.total_tokens).unwrap_or(0),
        model: response.model,
    })
}

#[async_trait]
impl<T: ChatTransport> Runnable<CompletionRequest, CompletionResult> for ResilientClient<T> {
    async fn invoke(&self, input: CompletionRequest) -> Result<CompletionResult, FaithcheckError> {
        self.create_chat_completion(&input).await
    }
}

#[derive(Clone)]
pub struct ResilientClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for ResilientClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl fmt::Debug for ResilientClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("ResilientClientBuilder")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("api_key", &api_key)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ResilientClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, value: &str) -> Result<Self, FaithcheckError> {
        let url = Url::parse(value)
            .map_err(|err| FaithcheckError::InvalidConfig(format!("base_url '{value}': {err}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Blank keys count as missing.
    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.api_key = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<ResilientClient<HttpTransport>, FaithcheckError> {
        let base_url = self.base_url.ok_or_else(|| {
            FaithcheckError::InvalidConfig("base_url is required".to_string())
        })?;
        if self.retry.max_attempts == 0 {
            return Err(FaithcheckError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let Some(api_key) = self.api_key else {
            tracing::warn!(base_url = %base_url, "no API key supplied; client left uninitialized");
            return Ok(ResilientClient::uninitialized(self.retry));
        };

        tracing::info!(
            base_url = %base_url,
            timeout_secs = self.timeout.as_secs(),
            "initializing API client"
        );
        let transport = HttpTransport::new(base_url, SecretString::new(api_key), self.timeout)?;
        Ok(ResilientClient::with_transport(transport, self.retry))
    }
}
