//! Fixed prompt texts. User templates use `{{context}}`, `{{question}}` and
//! `{{answer}}` placeholders.

/// The exact reply the generator must give when the context is insufficient.
pub const REFUSAL_PHRASE: &str = "Based on the context, I cannot answer this question.";

/// Substrings that mark an answer as a refusal. Matched case-insensitively.
pub const REFUSAL_MARKERS: [&str; 2] = ["cannot answer", "not mentioned"];

pub const REFUSAL_EXPLANATION: &str = "The model followed its instructions and stated that the \
     context does not contain the answer, so it did not hallucinate.";

pub const GENERATION_SYSTEM_PROMPT: &str = "You are a rigorous, instruction-following \
question-answering assistant. Your task is to answer the [Question] strictly, exclusively and \
entirely from the [Context] supplied by the user. Your answer must never contain knowledge or \
information from outside the [Context]. If the [Context] does not contain enough information to \
answer the [Question], you must reply with exactly and only: 'Based on the context, I cannot \
answer this question.' Do not add courtesy phrases or explanations unless the context supports \
them.";

pub const GENERATION_USER_TEMPLATE: &str = "[Context]:
{{context}}

---
[Question]:
{{question}}";

pub const DIRECT_ASK_SYSTEM_PROMPT: &str = "You are a rigorous evaluation assistant. Your task is \
to decide whether an [Answer] is *fully* supported by a [Context]. You must output your \
evaluation in strict JSON.
Evaluation criteria:
1. Faithful: every piece of information in the [Answer] is derived from or restates the [Context].
2. Hallucination: the [Answer] contains any information that the [Context] does not mention or \
that contradicts it.
";

pub const DIRECT_ASK_USER_TEMPLATE: &str = "[Context]:
{{context}}

[Answer]:
{{answer}}

---
Using the criteria above, decide whether the [Answer] is a [Hallucination].
Return your evaluation in the following JSON format (is_hallucination must be true or false):
{
  \"is_hallucination\": <true_or_false>,
  \"explanation\": \"<your detailed reasoning>\"
}";

pub const CHAIN_OF_THOUGHT_SYSTEM_PROMPT: &str = "You are an extremely rigorous and meticulous \
analyst. Your task is to evaluate whether an [Answer] is faithful to a [Context]. You must \
think step by step and finally output your conclusion as JSON.";

pub const CHAIN_OF_THOUGHT_USER_TEMPLATE: &str = "[Context]:
{{context}}

[Answer]:
{{answer}}

---
Follow these steps:

Step 1. [Analyse the answer]: break the [Answer] down into its core claims.
Step 2. [Check each claim]: look for explicit evidence in the [Context] supporting each claim.
Step 3. [Conclude]: summarise your findings. If every claim is supported, the answer is \
'faithful'. If any claim is not mentioned in or contradicts the context, the answer contains a \
'hallucination'.
Step 4. [Output JSON]: output only a JSON object with your final evaluation.

Return your evaluation strictly in the following JSON format:
{
  \"thought_process\": \"<your detailed analysis for steps 1, 2 and 3>\",
  \"is_hallucination\": <true_or_false>,
  \"explanation\": \"<a concise explanation of your final conclusion>\"
}";

pub const FEW_SHOT_SYSTEM_PROMPT: &str = "You are a rigorous evaluation assistant who learns from \
examples. Your task is to decide whether an [Answer] is *fully* supported by a [Context]. You \
must output your evaluation in strict JSON.";

pub const FEW_SHOT_USER_TEMPLATE: &str = "Here are some evaluation examples:

--- Example 1 (faithful) ---
[Context]:
\"Apple released the first-generation iPhone in 2007; it was unveiled by Steve Jobs.\"
[Answer]:
\"The first-generation iPhone was released by Apple in 2007.\"
[Evaluation JSON]:
{
  \"is_hallucination\": false,
  \"explanation\": \"Every fact in the answer ('iPhone', '2007', 'Apple') is supported by the context.\"
}

--- Example 2 (hallucination) ---
[Context]:
\"The Great Wall is an ancient Chinese defensive structure spanning thousands of kilometres.\"
[Answer]:
\"The Great Wall is a Chinese defensive structure built by Qin Shi Huang to keep out the Mongols \
from the north.\"
[Evaluation JSON]:
{
  \"is_hallucination\": true,
  \"explanation\": \"'Built by Qin Shi Huang' and 'to keep out the Mongols' are not mentioned in the [Context]. This is a hallucination.\"
}

--- Example 3 (hallucination) ---
[Context]:
\"Caffeine is a central nervous system stimulant. It occurs naturally in coffee beans and tea \
leaves.\"
[Answer]:
\"Caffeine is a stimulant found in coffee beans, tea leaves and cocoa beans.\"
[Evaluation JSON]:
{
  \"is_hallucination\": true,
  \"explanation\": \"'Cocoa beans' is not mentioned in the [Context].\"
}

--- Example 4 (faithful, unanswerable) ---
[Context]:
\"The Amazon is the river with the largest drainage basin in the world.\"
[Answer]:
\"Based on the context, I cannot answer this question.\"
[Evaluation JSON]:
{
  \"is_hallucination\": false,
  \"explanation\": \"The model correctly stated that it cannot answer. It did not invent information.\"
}

--- End of examples ---

Now evaluate the following [Task]:

[Task]:

[Context]:
{{context}}

[Answer]:
{{answer}}

---
Evaluate this [Task] using the JSON format of the examples above:
[Evaluation JSON]:";
