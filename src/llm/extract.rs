//! Pull JSON out of LLM responses and decode it into domain types
//!
//! Only syntactic validity and field presence are checked here; the remote
//! side is trusted for everything the schema cannot express.

use crate::core::error::{ArchitectError, Result};
use serde::de::DeserializeOwned;

/// Longest slice of the raw response echoed back in parse errors
const ERROR_EXCERPT_CHARS: usize = 200;

/// Extract JSON object from LLM response (handles surrounding text and code fences)
pub fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| ArchitectError::ParseError("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| ArchitectError::ParseError("No closing brace found in response".into()))?;
    if end < start {
        return Err(ArchitectError::ParseError(
            "Closing brace precedes opening brace".into(),
        ));
    }
    Ok(&response[start..=end])
}

/// Decode the JSON object embedded in `response` as `T`
///
/// `kind` names the request for error messages ("climate", "design", ...).
pub fn parse_response<T: DeserializeOwned>(response: &str, kind: &str) -> Result<T> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        ArchitectError::ParseError(format!(
            "Failed to parse {} response: {} - Response: {}",
            kind,
            e,
            excerpt(response)
        ))
    })
}

fn excerpt(response: &str) -> String {
    let mut chars = response.chars();
    let head: String = chars.by_ref().take(ERROR_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptimizationEvaluation;

    #[test]
    fn test_extract_json_simple() {
        let response = r#"{"furtherIteration": false}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Here is the evaluation:
```json
{"furtherIteration": true, "adjustments": [], "expectedBenefit": "small"}
```
Let me know if you need anything else."#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("furtherIteration"));
    }

    #[test]
    fn test_extract_json_no_json() {
        let result = extract_json("I cannot design that site");
        assert!(matches!(result, Err(ArchitectError::ParseError(_))));
    }

    #[test]
    fn test_extract_json_reversed_braces() {
        assert!(extract_json("} oops {").is_err());
    }

    #[test]
    fn test_parse_response_into_type() {
        let response = r#"{"furtherIteration": true, "adjustments": ["Add vents"], "expectedBenefit": "Cooler bedrooms"}"#;
        let evaluation: OptimizationEvaluation = parse_response(response, "evaluation").unwrap();
        assert!(evaluation.further_iteration);
        assert_eq!(evaluation.adjustments, vec!["Add vents".to_string()]);
    }

    #[test]
    fn test_parse_response_schema_mismatch() {
        let err = parse_response::<OptimizationEvaluation>(r#"{"verdict": "yes"}"#, "evaluation")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("evaluation"));
        assert!(message.contains("furtherIteration"));
    }

    #[test]
    fn test_excerpt_truncates_long_responses() {
        let long = "x".repeat(500);
        let short = excerpt(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), ERROR_EXCERPT_CHARS + 3);
    }
}
