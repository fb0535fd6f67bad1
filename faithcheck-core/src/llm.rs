use serde::{Deserialize, Serialize};

use crate::{FaithcheckError, Runnable};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One self-contained chat-completion request.
///
/// Every request carries its own system and user turns; nothing is remembered
/// between calls.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    structured_output: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
        temperature: f32,
    ) -> Result<Self, FaithcheckError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(FaithcheckError::InvalidRequest(
                "model cannot be empty".to_string(),
            ));
        }
        if !messages.iter().any(|m| m.role == Role::System) {
            return Err(FaithcheckError::InvalidRequest(
                "a system message is required".to_string(),
            ));
        }
        if !messages.iter().any(|m| m.role == Role::User) {
            return Err(FaithcheckError::InvalidRequest(
                "a user message is required".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(FaithcheckError::InvalidRequest(format!(
                "temperature must be within [0, 1], got {temperature}"
            )));
        }

        Ok(Self {
            model,
            messages,
            temperature,
            structured_output: false,
            max_tokens: None,
        })
    }

    /// Ask the service to constrain its reply to a single JSON object.
    pub fn with_structured_output(mut self, enabled: bool) -> Self {
        self.structured_output = enabled;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn structured_output(&self) -> bool {
        self.structured_output
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CompletionResult {
    pub content: String,
    pub total_tokens: u32,
    pub model: String,
}

/// Anything that can answer a [`CompletionRequest`].
pub trait ChatModel: Runnable<CompletionRequest, CompletionResult> + Send + Sync {}

impl<T> ChatModel for T where T: Runnable<CompletionRequest, CompletionResult> + Send + Sync {}
