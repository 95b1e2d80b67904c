//! JSON extraction from model output
//!
//! Even with a JSON response-format hint, models occasionally wrap the
//! payload in markdown code fences or surround it with prose. [`parse_json`]
//! tries progressively looser extractions until one parses: the text as-is,
//! the body of the first code fence, then the outermost `{...}` / `[...]`
//! spans. Callers treat any remaining failure as a malformed-output fault
//! and fall back.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap());

/// Payload candidates in decreasing strictness, deduplicated
fn candidate_payloads(trimmed: &str) -> Vec<&str> {
    let mut candidates = vec![trimmed];

    if let Some(body) = CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        candidates.push(body.as_str());
    }

    let mut spans: Vec<(usize, usize)> = [
        outer_span(trimmed, '{', '}'),
        outer_span(trimmed, '[', ']'),
    ]
    .into_iter()
    .flatten()
    .collect();
    spans.sort_by_key(|span| span.0);
    candidates.extend(spans.into_iter().map(|(start, end)| &trimmed[start..end]));

    candidates.dedup();
    candidates
}

fn outer_span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then_some((start, end + close.len_utf8()))
}

/// Parse model text into a typed value, tolerating decoration
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, crate::LlmError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(crate::LlmError::InvalidResponse(
            "no JSON payload in response".into(),
        ));
    }

    let mut last_error = None;
    for candidate in candidate_payloads(trimmed) {
        match serde_json::from_str(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }

    Err(crate::LlmError::InvalidResponse(match last_error {
        Some(e) => e.to_string(),
        None => "no JSON payload in response".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_object() {
        let parsed: serde_json::Value = parse_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn test_fenced_json() {
        let text = "```json\n{\"next_question\": \"Hi?\", \"is_complete\": false}\n```";
        let parsed: serde_json::Value = parse_json(text).unwrap();
        assert_eq!(parsed["is_complete"], false);
    }

    #[test]
    fn test_json_array_with_prose() {
        let text = "Here are the questions: [\"Q1\", \"Q2\", \"Q3\"]";
        let parsed: Vec<String> = parse_json(text).unwrap();
        assert_eq!(parsed, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn test_json_object_with_trailing_prose() {
        let parsed: serde_json::Value = parse_json(r#"{"a": 1} hope that helps!"#).unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn test_fenced_json_with_lead_in_prose() {
        let text = "Sure! Here you go:\n```json\n{\"score\": 80}\n```\nLet me know.";
        let parsed: serde_json::Value = parse_json(text).unwrap();
        assert_eq!(parsed["score"], 80);
    }

    #[test]
    fn test_not_json_fails() {
        let result: Result<serde_json::Value, _> = parse_json("not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_fails() {
        let result: Result<serde_json::Value, _> = parse_json("   ");
        assert!(result.is_err());
    }

    #[test]
    fn test_truncated_json_fails() {
        let result: Result<serde_json::Value, _> = parse_json(r#"{"a": "#);
        assert!(result.is_err());
    }
}
