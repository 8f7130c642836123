//! Parse LLM output into a metadata record

use crate::error::ExtractorError;
use crate::types::Metadata;
use serde_json::Value;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Pull the JSON payload out of a reply, handling markdown code fences
///
/// Takes the first `json`-tagged fenced block if it is closed, else the
/// first closed untagged block, else the whole reply. The result is trimmed
/// but not checked for well-formedness.
pub fn extract_json(text: &str) -> &str {
    if let Some(inner) = fenced_after(text, JSON_FENCE) {
        return inner;
    }
    if let Some(inner) = fenced_after(text, FENCE) {
        return inner;
    }
    text.trim()
}

fn fenced_after<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(opener)?;
    let (inner, _) = rest.split_once(FENCE)?;
    Some(inner.trim())
}

/// Parse and validate a reply as [`Metadata`]
pub fn parse_metadata(response: &str) -> Result<Metadata, ExtractorError> {
    let json_str = extract_json(response);

    let value: Value = serde_json::from_str(json_str)?;

    if !value.is_object() {
        return Err(ExtractorError::InvalidFormat(
            "Expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ExtractorError::Validation(e.to_string()))
}
