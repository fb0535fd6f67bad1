use std::fs;
use std::path::Path;

use faithcheck_core::FaithcheckError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TestCase {
    pub id: String,
    pub context: String,
    pub question: String,
}

impl TestCase {
    pub fn new(
        id: impl Into<String>,
        context: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            context: context.into(),
            question: question.into(),
        }
    }
}

/// A faithful case, an unanswerable case and a case inviting a subtle hallucination.
pub fn builtin_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(
            "case_001 (faithful)",
            "The Mariana Trench is the deepest known oceanic trench on Earth, located in the \
             western Pacific Ocean. Its deepest point is called the Challenger Deep and is about \
             11,034 meters deep. This depth exceeds the height of Mount Everest above sea level.",
            "What is the deepest point of the Mariana Trench called, and how deep is it?",
        ),
        TestCase::new(
            "case_002 (hallucination)",
            "The solar system has eight planets. In order of distance from the Sun they are \
             Mercury, Venus, Earth and Mars. Beyond Mars lie Jupiter and Saturn.",
            "What is Mars's average temperature?",
        ),
        TestCase::new(
            "case_003 (subtle hallucination)",
            "AIGC (AI-generated content) refers to AI that can create new content such as text, \
             images or music. Well-known models include OpenAI's GPT series and Google's Gemini.",
            "Which AIGC models are there?",
        ),
    ]
}

/// Loads cases from a `.json`, `.yaml` or `.yml` file holding a list of
/// `{id, context, question}` records.
pub fn load_cases(path: &Path) -> Result<Vec<TestCase>, FaithcheckError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        FaithcheckError::InvalidConfig(format!("cannot read cases file {}: {err}", path.display()))
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let cases: Vec<TestCase> = match extension.as_deref() {
        Some("json") => serde_json::from_str(&raw)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw).map_err(|err| {
            FaithcheckError::InvalidConfig(format!("invalid cases file {}: {err}", path.display()))
        })?,
        _ => {
            return Err(FaithcheckError::InvalidConfig(format!(
                "unsupported cases file {}: expected .json, .yaml or .yml",
                path.display()
            )))
        }
    };

    if cases.is_empty() {
        return Err(FaithcheckError::InvalidConfig(format!(
            "cases file {} contains no cases",
            path.display()
        )));
    }
    tracing::info!(count = cases.len(), path = %path.display(), "loaded test cases");
    Ok(cases)
}
