use std::collections::HashMap;

use faithcheck_core::{FaithcheckError, Value};
use regex::Regex;

/// Text with `{{name}}` placeholders.
///
/// Substituted values are inserted verbatim and never rescanned, so a context
/// that itself contains `{{...}}` is left untouched.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, FaithcheckError> {
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|e| FaithcheckError::InvalidConfig(e.to_string()))?;

        if let Some(missing) = pattern
            .captures_iter(&self.template)
            .map(|caps| caps[1].to_string())
            .find(|key| !vars.contains_key(key))
        {
            return Err(FaithcheckError::InvalidConfig(format!(
                "missing prompt variable '{missing}'"
            )));
        }

        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.into_owned())
    }
}
