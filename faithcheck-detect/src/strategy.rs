use std::fmt;
use std::str::FromStr;

use faithcheck_core::FaithcheckError;
use faithcheck_prompt::ChatPromptTemplate;
use serde::{Deserialize, Serialize};

use crate::prompts::{
    CHAIN_OF_THOUGHT_SYSTEM_PROMPT, CHAIN_OF_THOUGHT_USER_TEMPLATE, DIRECT_ASK_SYSTEM_PROMPT,
    DIRECT_ASK_USER_TEMPLATE, FEW_SHOT_SYSTEM_PROMPT, FEW_SHOT_USER_TEMPLATE,
};

/// How the detector model is asked to judge faithfulness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Single-shot judgment.
    DirectAsk,
    /// Step-by-step analysis written out before the verdict.
    ChainOfThought,
    /// Four worked examples precede the task.
    FewShot,
}

impl DetectionStrategy {
    pub const ALL: [DetectionStrategy; 3] = [
        DetectionStrategy::DirectAsk,
        DetectionStrategy::ChainOfThought,
        DetectionStrategy::FewShot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DetectionStrategy::DirectAsk => "direct_ask",
            DetectionStrategy::ChainOfThought => "chain_of_thought",
            DetectionStrategy::FewShot => "few_shot",
        }
    }

    pub fn prompt(self) -> ChatPromptTemplate {
        let (system, user) = match self {
            DetectionStrategy::DirectAsk => (DIRECT_ASK_SYSTEM_PROMPT, DIRECT_ASK_USER_TEMPLATE),
            DetectionStrategy::ChainOfThought => (
                CHAIN_OF_THOUGHT_SYSTEM_PROMPT,
                CHAIN_OF_THOUGHT_USER_TEMPLATE,
            ),
            DetectionStrategy::FewShot => (FEW_SHOT_SYSTEM_PROMPT, FEW_SHOT_USER_TEMPLATE),
        };
        ChatPromptTemplate::system_and_human(system, user)
    }

    /// JSON mode is withheld for few-shot: its long prompt behaves worse under it.
    pub fn requests_structured_output(self) -> bool {
        match self {
            DetectionStrategy::DirectAsk | DetectionStrategy::ChainOfThought => true,
            DetectionStrategy::FewShot => false,
        }
    }
}

impl fmt::Display for DetectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionStrategy {
    type Err = FaithcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetectionStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s.trim())
            .ok_or_else(|| FaithcheckError::UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for strategy in DetectionStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<DetectionStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "majority_vote".parse::<DetectionStrategy>().unwrap_err();
        assert!(matches!(err, FaithcheckError::UnknownStrategy(tag) if tag == "majority_vote"));
    }

    #[test]
    fn only_few_shot_skips_json_mode() {
        assert!(DetectionStrategy::DirectAsk.requests_structured_output());
        assert!(DetectionStrategy::ChainOfThought.requests_structured_output());
        assert!(!DetectionStrategy::FewShot.requests_structured_output());
    }
}
