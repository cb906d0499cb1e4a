//! JSON span extraction from free-form model replies.

/// Extract the first-`{`-to-last-`}` span from raw reply text.
///
/// This is deliberately a greedy heuristic, not a JSON-aware bracket
/// matcher: the model is instructed to return a single JSON object, and
/// the span between the first `{` and the last `}` captures it even when
/// wrapped in prose or a markdown fence. It will mis-extract if the reply
/// ever carries more than one JSON object or literal braces in prose;
/// the parse step downstream catches those as malformed JSON.
///
/// Returns `None` when the text has no such span (no `{`, no `}`, or the
/// last `}` precedes the first `{`).
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_bare_object() {
        assert_eq!(extract_json_object(r#"{"topic": "x"}"#), Some(r#"{"topic": "x"}"#));
    }

    #[test]
    fn test_extracts_object_wrapped_in_prose() {
        let text = "Sure! Here is your roadmap:\n```json\n{\"topic\": \"x\", \"steps\": []}\n```\nEnjoy!";
        assert_eq!(extract_json_object(text), Some(r#"{"topic": "x", "steps": []}"#));
    }

    #[test]
    fn test_no_braces_returns_none() {
        assert_eq!(extract_json_object("I could not produce a roadmap."), None);
    }

    #[test]
    fn test_only_open_brace_returns_none() {
        assert_eq!(extract_json_object("here { we go"), None);
    }

    #[test]
    fn test_close_before_open_returns_none() {
        assert_eq!(extract_json_object("} nothing here {"), None);
    }

    #[test]
    fn test_greedy_span_covers_multiple_objects() {
        // Known limitation: two objects produce one invalid greedy span.
        // The parse step downstream reports it as malformed JSON.
        let text = r#"{"a": 1} and {"b": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": 1} and {"b": 2}"#));
    }

    #[test]
    fn test_nested_object_is_covered() {
        let text = r#"{"steps": [{"id": "step-1"}]}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }
}
