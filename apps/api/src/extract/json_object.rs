use serde_json::{Map, Value};

use super::ExtractError;

/// Parses the span between the first `{` and the last `}` of a model reply.
///
/// This strips surrounding prose and code fences but nothing else: if the
/// span is not a valid JSON object the reply is reported as malformed.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ExtractError> {
    let trimmed = text.trim();
    let start = trimmed
        .find('{')
        .ok_or_else(|| ExtractError::malformed("no opening brace", text))?;
    let end = trimmed
        .rfind('}')
        .ok_or_else(|| ExtractError::malformed("no closing brace", text))?;
    if end < start {
        return Err(ExtractError::malformed("closing brace precedes opening brace", text));
    }

    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ExtractError::malformed("not a JSON object", text)),
        Err(e) => Err(ExtractError::malformed(format!("invalid JSON: {e}"), text)),
    }
}
