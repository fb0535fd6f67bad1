use faithcheck_core::{extract_fenced_json, FaithcheckError, JsonOutputParser, Value};
use serde_json::json;

#[test]
fn parses_plain_json() {
    let parser = JsonOutputParser::<Value>::new();
    let output = parser
        .parse(r#"  {"is_hallucination": false, "explanation": "ok"} "#)
        .unwrap();
    assert_eq!(output, json!({"is_hallucination": false, "explanation": "ok"}));
}

#[test]
fn recovers_json_from_fence_surrounded_by_prose() {
    let parser = JsonOutputParser::<Value>::new();
    let text = "Here is my verdict:\n```json\n{\"is_hallucination\": true, \"explanation\": \"extra name\"}\n```\nThanks.";
    let output = parser.parse(text).unwrap();
    assert_eq!(output["is_hallucination"], json!(true));
    assert_eq!(output["explanation"], json!("extra name"));
}

#[test]
fn unterminated_fence_runs_to_end() {
    assert_eq!(extract_fenced_json("```json\n{\"a\": 1}\n"), Some("{\"a\": 1}"));
    assert_eq!(extract_fenced_json("no fence here"), None);
}

#[test]
fn parses_into_typed_output() {
    #[derive(serde::Deserialize, PartialEq, Debug)]
    struct Verdict {
        is_hallucination: bool,
    }

    let parser = JsonOutputParser::<Verdict>::new();
    let output = parser.parse("```json\n{\"is_hallucination\": true}\n```").unwrap();
    assert_eq!(output, Verdict { is_hallucination: true });
}

#[test]
fn reports_raw_text_when_nothing_parses() {
    let parser = JsonOutputParser::<Value>::new();
    let err = parser.parse("I think it is fine.").unwrap_err();
    match err {
        FaithcheckError::ParseFailed { output, .. } => assert_eq!(output, "I think it is fine."),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn broken_fenced_json_still_fails() {
    let parser = JsonOutputParser::<Value>::new();
    let err = parser.parse("```json\n{\"is_hallucination\": \n```").unwrap_err();
    assert!(matches!(err, FaithcheckError::ParseFailed { .. }));
}
