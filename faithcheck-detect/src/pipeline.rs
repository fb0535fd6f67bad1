use faithcheck_core::ChatModel;
use serde::Serialize;

use crate::{DetectionVerdict, Detector, GenerationResult, Generator, Settings, TestCase};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Generation failed, so detection was skipped for this case.
    GenerationFailed { error_message: String },
    Evaluated {
        answer: String,
        tokens_used: u32,
        model_used: String,
        verdicts: Vec<DetectionVerdict>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseReport {
    #[serde(flatten)]
    pub case: TestCase,
    #[serde(flatten)]
    pub outcome: CaseOutcome,
}

/// Generation followed by every configured detection strategy, one case at a time.
pub struct Pipeline<'a, M> {
    generator: Generator<'a, M>,
    detector: Detector<'a, M>,
    strategies: Vec<String>,
}

impl<'a, M: ChatModel> Pipeline<'a, M> {
    pub fn new(model: &'a M, settings: &Settings) -> Self {
        Self {
            generator: Generator::new(model, settings),
            detector: Detector::new(model, settings),
            strategies: settings.strategies.clone(),
        }
    }

    pub async fn run_case(&self, case: &TestCase) -> CaseReport {
        tracing::info!(case = %case.id, "processing test case");

        let outcome = match self.generator.generate(&case.context, &case.question).await {
            GenerationResult::Failure { error_message } => {
                tracing::warn!(case = %case.id, "skipping detection after failed generation");
                CaseOutcome::GenerationFailed { error_message }
            }
            GenerationResult::Success {
                answer,
                tokens_used,
                model_used,
            } => {
                let mut verdicts = Vec::with_capacity(self.strategies.len());
                for tag in &self.strategies {
                    verdicts.push(self.detector.detect_tag(&case.context, &answer, tag).await);
                }
                CaseOutcome::Evaluated {
                    answer,
                    tokens_used,
                    model_used,
                    verdicts,
                }
            }
        };

        CaseReport {
            case: case.clone(),
            outcome,
        }
    }

    /// Runs every case in order. A failing case never stops the batch.
    pub async fn run(&self, cases: &[TestCase]) -> Vec<CaseReport> {
        let mut reports = Vec::with_capacity(cases.len());
        for case in cases {
            reports.push(self.run_case(case).await);
        }
        reports
    }
}
