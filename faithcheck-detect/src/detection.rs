use std::collections::HashMap;

use faithcheck_core::{ChatModel, CompletionRequest, FaithcheckError, Runnable, Value};

use crate::prompts::{REFUSAL_EXPLANATION, REFUSAL_MARKERS};
use crate::{DetectionStrategy, DetectionVerdict, Settings};

/// Returns the refusal marker contained in `answer`, if any.
pub fn refusal_marker(answer: &str) -> Option<&'static str> {
    let lowered = answer.to_lowercase();
    REFUSAL_MARKERS
        .into_iter()
        .find(|marker| lowered.contains(marker))
}

/// Judges whether an answer is faithful to its context.
pub struct Detector<'a, M> {
    model: &'a M,
    model_name: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl<'a, M: ChatModel> Detector<'a, M> {
    pub fn new(model: &'a M, settings: &Settings) -> Self {
        Self {
            model,
            model_name: settings.detector_model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Detection by raw strategy tag. An unknown tag yields an `error` verdict
    /// without touching the model.
    pub async fn detect_tag(&self, context: &str, answer: &str, tag: &str) -> DetectionVerdict {
        match tag.parse::<DetectionStrategy>() {
            Ok(strategy) => self.detect(context, answer, strategy).await,
            Err(err) => {
                tracing::error!(strategy = tag, "unknown detection strategy");
                DetectionVerdict::error(tag, err.to_string())
            }
        }
    }

    /// Never fails: client errors become `error` verdicts tagged with the strategy.
    pub async fn detect(
        &self,
        context: &str,
        answer: &str,
        strategy: DetectionStrategy,
    ) -> DetectionVerdict {
        match self.try_detect(context, answer, strategy).await {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::error!(%strategy, error = %err, "detector call failed");
                DetectionVerdict::error(strategy.as_str(), err.to_string())
            }
        }
    }

    pub async fn try_detect(
        &self,
        context: &str,
        answer: &str,
        strategy: DetectionStrategy,
    ) -> Result<DetectionVerdict, FaithcheckError> {
        tracing::info!(%strategy, "running hallucination detection");

        // A model that declines to answer cannot be hallucinating.
        if let Some(marker) = refusal_marker(answer) {
            tracing::info!(%strategy, marker, "answer is a refusal, skipping detector call");
            return Ok(DetectionVerdict::faithful(
                strategy.as_str(),
                REFUSAL_EXPLANATION,
            ));
        }

        let request = self.build_request(context, answer, strategy)?;
        let completion = self.model.invoke(request).await?;
        let verdict = DetectionVerdict::parse(strategy.as_str(), &completion.content);
        tracing::info!(%strategy, verdict = %verdict.is_hallucination, "detection finished");
        Ok(verdict)
    }

    pub fn build_request(
        &self,
        context: &str,
        answer: &str,
        strategy: DetectionStrategy,
    ) -> Result<CompletionRequest, FaithcheckError> {
        let vars = HashMap::from([
            ("context".to_string(), Value::from(context)),
            ("answer".to_string(), Value::from(answer)),
        ]);
        let messages = strategy.prompt().format_messages(&vars)?;
        let request = CompletionRequest::new(&self.model_name, messages, self.temperature)?
            .with_structured_output(strategy.requests_structured_output());
        Ok(match self.max_tokens {
            Some(limit) => request.with_max_tokens(limit),
            None => request,
        })
    }
}
