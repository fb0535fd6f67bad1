//! Context-grounded answer generation and LLM-judged hallucination detection.

mod cases;
mod detection;
mod generation;
mod pipeline;
pub mod prompts;
mod report;
pub mod settings;
mod strategy;
mod verdict;

pub use cases::{builtin_cases, load_cases, TestCase};
pub use detection::{refusal_marker, Detector};
pub use generation::{GenerationResult, Generator};
pub use pipeline::{CaseOutcome, CaseReport, Pipeline};
pub use settings::Settings;
pub use strategy::DetectionStrategy;
pub use verdict::{DetectionVerdict, HallucinationFlag};
