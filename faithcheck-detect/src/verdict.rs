use std::fmt;

use faithcheck_core::{JsonOutputParser, Value};
use serde::{Serialize, Serializer};

/// Outcome of one faithfulness judgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HallucinationFlag {
    Faithful,
    Hallucinated,
    /// The judgment could not be obtained or understood.
    Error,
}

impl HallucinationFlag {
    /// Accepts JSON booleans and the strings "true"/"false"; anything else is an error.
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => HallucinationFlag::Hallucinated,
            Some(Value::Bool(false)) => HallucinationFlag::Faithful,
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => {
                HallucinationFlag::Hallucinated
            }
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => {
                HallucinationFlag::Faithful
            }
            _ => HallucinationFlag::Error,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            HallucinationFlag::Faithful => Some(false),
            HallucinationFlag::Hallucinated => Some(true),
            HallucinationFlag::Error => None,
        }
    }
}

impl fmt::Display for HallucinationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_bool() {
            Some(flag) => write!(f, "{flag}"),
            None => f.write_str("error"),
        }
    }
}

impl Serialize for HallucinationFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_bool() {
            Some(flag) => serializer.serialize_bool(flag),
            None => serializer.serialize_str("error"),
        }
    }
}

/// One (case, strategy) judgment. Built once, only displayed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectionVerdict {
    #[serde(rename = "strategy_used")]
    pub strategy: String,
    pub is_hallucination: HallucinationFlag,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought_process: Option<String>,
}

impl DetectionVerdict {
    pub fn faithful(strategy: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            is_hallucination: HallucinationFlag::Faithful,
            explanation: explanation.into(),
            thought_process: None,
        }
    }

    pub fn error(strategy: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            is_hallucination: HallucinationFlag::Error,
            explanation: explanation.into(),
            thought_process: None,
        }
    }

    /// Best-effort reading of the detector's reply. Never fails: text without a
    /// usable JSON object yields an `error` verdict that echoes the raw output.
    pub fn parse(strategy: impl Into<String>, text: &str) -> Self {
        let strategy = strategy.into();
        let object = match JsonOutputParser::<Value>::new().parse(text) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                tracing::warn!(
                    %strategy,
                    kind = json_kind(&other),
                    "detector returned JSON that is not an object"
                );
                return Self::error(strategy, unparsable(text));
            }
            Err(err) => {
                tracing::warn!(%strategy, error = %err, "could not parse detector output as JSON");
                return Self::error(strategy, unparsable(text));
            }
        };

        Self {
            strategy,
            is_hallucination: HallucinationFlag::from_value(object.get("is_hallucination")),
            explanation: object.get("explanation").map(text_of).unwrap_or_default(),
            thought_process: object.get("thought_process").map(text_of),
        }
    }
}

fn unparsable(text: &str) -> String {
    format!("failed to parse JSON from the detector; raw output: {text}")
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
