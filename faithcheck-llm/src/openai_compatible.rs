//! Generic OpenAI-compatible chat-completion transport
//!
//! Works with any provider that speaks OpenAI's `/chat/completions` format
//! (DeepSeek, OpenAI, Together, ...).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use faithcheck_core::{CompletionRequest, FaithcheckError, Message, ProviderError};

use crate::ChatTransport;

/// Request body for the chat completions endpoint
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    pub stream: bool,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model().to_string(),
            messages: request.messages().to_vec(),
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
            response_format: request
                .structured_output()
                .then(ResponseFormat::json_object),
            stream: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Usage {
    pub total_tokens: u32,
}

#[derive(Deserialize, Debug, Clone)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Deserialize, Debug, Clone)]
struct ModelEntry {
    id: String,
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
}

/// reqwest-backed transport with bearer authentication and a per-request timeout.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    api_key: SecretString,
    timeout: Duration,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpTransport {
    pub fn new(
        base_url: Url,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, FaithcheckError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FaithcheckError::InvalidConfig(err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key,
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn map_request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_body() {
            ProviderError::Connection(err.to_string())
        } else {
            ProviderError::InvalidResponse(err.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ProviderError> {
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| self.map_request_error(err))
    }
}

async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(ProviderError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<OpenAiError>(&body)
        .map(|err| err.error.message)
        .unwrap_or(body);
    Err(ProviderError::Http {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self
            .http
            .get(self.endpoint("models"))
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(|err| self.map_request_error(err))?;
        let models: ModelList = self.decode(response).await?;
        Ok(models.data.into_iter().map(|entry| entry.id).collect())
    }

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let response = self
            .http
            .post(self.endpoint("chat/completions"))
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|err| self.map_request_error(err))?;
        self.decode(response).await
    }
}
