use std::time::Duration;

use faithcheck_core::{FaithcheckError, RetryPolicy};

use crate::DetectionStrategy;

pub const DEFAULT_MODEL: &str = "deepseek-chat";
/// Deterministic sampling for both generation and detection.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
/// Reserved for creative generation; unused by the pipeline.
pub const CREATIVE_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_STRATEGY: DetectionStrategy = DetectionStrategy::ChainOfThought;

/// Knobs for the generation and detection stages.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub generator_model: String,
    pub detector_model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
    pub max_attempts: usize,
    /// Strategy tags run per case, in order. Kept as raw tags so that an
    /// unknown one becomes an error verdict instead of aborting the batch.
    pub strategies: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generator_model: DEFAULT_MODEL.to_string(),
            detector_model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strategies: DetectionStrategy::ALL
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        }
    }
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
    }

    pub fn validate(&self) -> Result<(), FaithcheckError> {
        if self.generator_model.trim().is_empty() || self.detector_model.trim().is_empty() {
            return Err(FaithcheckError::InvalidConfig(
                "model names cannot be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(FaithcheckError::InvalidConfig(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if self.max_attempts == 0 {
            return Err(FaithcheckError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.strategies.is_empty() {
            return Err(FaithcheckError::InvalidConfig(
                "at least one detection strategy is required".to_string(),
            ));
        }
        Ok(())
    }
}
