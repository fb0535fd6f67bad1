use std::collections::HashMap;

use faithcheck_core::{ChatModel, CompletionRequest, FaithcheckError, Runnable, Value};
use faithcheck_prompt::ChatPromptTemplate;
use serde::Serialize;

use crate::prompts::{GENERATION_SYSTEM_PROMPT, GENERATION_USER_TEMPLATE};
use crate::Settings;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Success {
        answer: String,
        tokens_used: u32,
        model_used: String,
    },
    #[serde(rename = "error")]
    Failure { error_message: String },
}

impl GenerationResult {
    pub fn answer(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { answer, .. } => Some(answer),
            GenerationResult::Failure { .. } => None,
        }
    }
}

/// Answers a question from the supplied context only.
pub struct Generator<'a, M> {
    model: &'a M,
    model_name: String,
    temperature: f32,
    max_tokens: Option<u32>,
    prompt: ChatPromptTemplate,
}

impl<'a, M: ChatModel> Generator<'a, M> {
    pub fn new(model: &'a M, settings: &Settings) -> Self {
        Self {
            model,
            model_name: settings.generator_model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            prompt: ChatPromptTemplate::system_and_human(
                GENERATION_SYSTEM_PROMPT,
                GENERATION_USER_TEMPLATE,
            ),
        }
    }

    pub fn build_request(
        &self,
        context: &str,
        question: &str,
    ) -> Result<CompletionRequest, FaithcheckError> {
        let vars = HashMap::from([
            ("context".to_string(), Value::from(context)),
            ("question".to_string(), Value::from(question)),
        ]);
        let messages = self.prompt.format_messages(&vars)?;
        let request = CompletionRequest::new(&self.model_name, messages, self.temperature)?;
        Ok(match self.max_tokens {
            Some(limit) => request.with_max_tokens(limit),
            None => request,
        })
    }

    /// Never fails: every error comes back as [`GenerationResult::Failure`].
    pub async fn generate(&self, context: &str, question: &str) -> GenerationResult {
        tracing::info!(model = %self.model_name, "generating answer");
        match self.try_generate(context, question).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "answer generation failed");
                GenerationResult::Failure {
                    error_message: err.to_string(),
                }
            }
        }
    }

    async fn try_generate(
        &self,
        context: &str,
        question: &str,
    ) -> Result<GenerationResult, FaithcheckError> {
        let request = self.build_request(context, question)?;
        let completion = self.model.invoke(request).await?;
        tracing::info!(
            tokens = completion.total_tokens,
            model = %completion.model,
            "answer generated"
        );
        Ok(GenerationResult::Success {
            answer: completion.content,
            tokens_used: completion.total_tokens,
            model_used: completion.model,
        })
    }
}
