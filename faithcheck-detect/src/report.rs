use std::fmt;

use crate::{CaseOutcome, CaseReport, DetectionVerdict};

const CONTEXT_PREVIEW_CHARS: usize = 100;
const THOUGHT_PREVIEW_CHARS: usize = 150;

fn preview(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

impl fmt::Display for DetectionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy: {}", self.strategy)?;
        writeln!(f, "  Hallucination: {}", self.is_hallucination)?;
        write!(f, "  Explanation: {}", self.explanation)?;
        if let Some(thought) = &self.thought_process {
            write!(
                f,
                "\n  Thought process: {}",
                preview(thought, THOUGHT_PREVIEW_CHARS)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = &self.case.id;
        let rule = "=".repeat(20);
        writeln!(f, "{rule} [Test case: {id}] {rule}")?;
        writeln!(
            f,
            "[Context]: {}",
            preview(&self.case.context, CONTEXT_PREVIEW_CHARS)
        )?;
        writeln!(f, "[Question]: {}", self.case.question)?;
        writeln!(f)?;

        match &self.outcome {
            CaseOutcome::GenerationFailed { error_message } => {
                writeln!(f, "[Stage 1] Answer generation failed: {error_message}")?;
            }
            CaseOutcome::Evaluated {
                answer, verdicts, ..
            } => {
                writeln!(f, "[Stage 1] Generated answer:\n{answer}")?;
                writeln!(f)?;
                let rule = "-".repeat(15);
                writeln!(f, "{rule} [Case {id} report] {rule}")?;
                for verdict in verdicts {
                    writeln!(f)?;
                    writeln!(f, "{verdict}")?;
                }
            }
        }

        write!(f, "{}", "=".repeat(42 + id.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("마리아나 해구", 4), "마리아나...");
    }
}
