use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::{FaithcheckError, Value};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Parses model output that is supposed to hold one JSON document.
///
/// The whole text is tried first; if that fails, the interior of the first
/// "```json" fence is tried. An unterminated fence runs to the end of the text.
#[derive(Clone, Debug, Default)]
pub struct JsonOutputParser<T = Value> {
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonOutputParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn parse(&self, input: &str) -> Result<T, FaithcheckError> {
        let direct = match serde_json::from_str(input.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        tracing::debug!(error = %direct, "direct JSON parse failed, looking for a fenced block");

        let Some(fenced) = extract_fenced_json(input) else {
            return Err(FaithcheckError::ParseFailed {
                output: input.to_string(),
                reason: direct.to_string(),
            });
        };

        serde_json::from_str(fenced).map_err(|err| FaithcheckError::ParseFailed {
            output: input.to_string(),
            reason: format!("fenced block: {err}"),
        })
    }
}

/// Returns the trimmed interior of the first "```json" fence, if any.
pub fn extract_fenced_json(input: &str) -> Option<&str> {
    let start = input.find(JSON_FENCE)? + JSON_FENCE.len();
    let rest = &input[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    Some(rest[..end].trim())
}
