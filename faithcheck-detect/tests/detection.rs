mod common;

use common::ScriptedModel;
use faithcheck_core::{FaithcheckError, ProviderError, Role};
use faithcheck_detect::prompts::REFUSAL_PHRASE;
use faithcheck_detect::{
    refusal_marker, DetectionStrategy, Detector, HallucinationFlag, Settings,
};

const CONTEXT: &str = "AIGC refers to AI that creates content. Known models include GPT and Gemini.";

#[test]
fn refusal_markers_are_case_insensitive() {
    assert_eq!(refusal_marker(REFUSAL_PHRASE), Some("cannot answer"));
    assert_eq!(refusal_marker("That is Not Mentioned anywhere."), Some("not mentioned"));
    assert_eq!(refusal_marker("GPT and Gemini."), None);
}

#[tokio::test]
async fn refusals_short_circuit_every_strategy() {
    let model = ScriptedModel::silent();
    let settings = Settings::default();
    let detector = Detector::new(&model, &settings);

    for strategy in DetectionStrategy::ALL {
        let verdict = detector.detect(CONTEXT, REFUSAL_PHRASE, strategy).await;
        assert_eq!(verdict.is_hallucination, HallucinationFlag::Faithful);
        assert_eq!(verdict.strategy, strategy.as_str());
    }
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn unknown_tag_never_reaches_the_model() {
    let model = ScriptedModel::replying(&[r#"{"is_hallucination": false, "explanation": "x"}"#]);
    let settings = Settings::default();
    let detector = Detector::new(&model, &settings);

    let verdict = detector.detect_tag(CONTEXT, "GPT and Claude.", "majority_vote").await;

    assert_eq!(verdict.is_hallucination, HallucinationFlag::Error);
    assert_eq!(verdict.strategy, "majority_vote");
    assert!(verdict.explanation.contains("majority_vote"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn direct_ask_requests_json_mode_and_parses_verdict() {
    let model = ScriptedModel::replying(&[
        r#"{"is_hallucination": true, "explanation": "Claude is not in the context."}"#,
    ]);
    let settings = Settings::default();
    let detector = Detector::new(&model, &settings);

    let verdict = detector
        .detect_tag(CONTEXT, "GPT, Gemini and Claude.", "direct_ask")
        .await;

    assert_eq!(verdict.is_hallucination, HallucinationFlag::Hallucinated);
    assert_eq!(verdict.strategy, "direct_ask");

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.structured_output());
    assert_eq!(request.temperature(), 0.0);
    assert_eq!(request.model(), settings.detector_model);
    assert_eq!(request.messages()[0].role, Role::System);
    assert!(request.messages()[1].content.contains(CONTEXT));
    assert!(request.messages()[1].content.contains("GPT, Gemini and Claude."));
}

#[tokio::test]
async fn few_shot_withholds_json_mode_and_embeds_examples() {
    let model = ScriptedModel::replying(&[
        "[Evaluation JSON]:\n```json\n{\"is_hallucination\": false, \"explanation\": \"ok\"}\n```",
    ]);
    let settings = Settings::default();
    let detector = Detector::new(&model, &settings);

    let verdict = detector
        .detect(CONTEXT, "GPT and Gemini.", DetectionStrategy::FewShot)
        .await;

    assert_eq!(verdict.is_hallucination, HallucinationFlag::Faithful);
    let request = &model.requests()[0];
    assert!(!request.structured_output());
    let user = &request.messages()[1].content;
    for example in ["Example 1", "Example 2", "Example 3", "Example 4"] {
        assert!(user.contains(example), "missing {example}");
    }
}

#[tokio::test]
async fn chain_of_thought_keeps_reasoning_trace() {
    let model = ScriptedModel::replying(&[
        r#"{"thought_process": "Claim 1: GPT - supported.", "is_hallucination": false, "explanation": "Supported."}"#,
    ]);
    let settings = Settings::default();
    let detector = Detector::new(&model, &settings);

    let verdict = detector
        .detect(CONTEXT, "GPT.", DetectionStrategy::ChainOfThought)
        .await;

    assert_eq!(verdict.thought_process.as_deref(), Some("Claim 1: GPT - supported."));
    assert!(model.requests()[0].structured_output());
}

#[tokio::test]
async fn client_failures_become_error_verdicts() {
    let model = ScriptedModel::new(vec![Err(FaithcheckError::RetryExhausted {
        attempts: 3,
        last_error: ProviderError::RateLimited { retry_after: None },
    })]);
    let settings = Settings::default();
    let detector = Detector::new(&model, &settings);

    let verdict = detector
        .detect(CONTEXT, "GPT.", DetectionStrategy::DirectAsk)
        .await;

    assert_eq!(verdict.is_hallucination, HallucinationFlag::Error);
    assert!(verdict.explanation.contains("Gave up after 3 attempts"));
    assert_eq!(verdict.strategy, "direct_ask");
}
