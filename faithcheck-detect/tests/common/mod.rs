#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use faithcheck_core::{CompletionRequest, CompletionResult, FaithcheckError, Runnable};

/// Replays canned replies in order and records every request it receives.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, FaithcheckError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, FaithcheckError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Runnable<CompletionRequest, CompletionResult> for ScriptedModel {
    async fn invoke(&self, input: CompletionRequest) -> Result<CompletionResult, FaithcheckError> {
        let model = input.model().to_string();
        self.requests.lock().unwrap().push(input);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FaithcheckError::UnknownFailure(
                    "script exhausted".to_string(),
                ))
            });
        reply.map(|content| CompletionResult {
            content,
            total_tokens: 42,
            model,
        })
    }
}
