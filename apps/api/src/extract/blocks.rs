//! Repeated-key extraction.
//!
//! The validation prompt asks for one `"content": {...}` entry per field, so
//! a well-behaved reply repeats the same key inside one object. That is not
//! valid JSON for any parser that keeps only the last key, so each entry is
//! located with a small scanner and parsed on its own.

use serde::{Deserialize, Serialize};

use super::{strip_code_fences, ExtractError};

/// The model's verdict for one story field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub follows: bool,
    #[serde(rename = "_uid")]
    pub uid: String,
    /// Only set when `follows` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Verdict {
    follows: bool,
    #[serde(rename = "_uid")]
    uid: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Extracts every `"content": {...}` entry from a validation reply.
pub fn extract_content_blocks(text: &str) -> Result<Vec<ValidationResult>, ExtractError> {
    extract_repeated_blocks(text, "content")
}

/// Extracts every `"<field_name>": {...}` entry, in source order.
///
/// Braces and quotes inside string values and nested objects are handled.
/// An entry nested inside an already captured entry is not reported again.
///
/// A quote only opens a key when it follows `{` or `,` and its string is
/// followed by `:`. Any other quote (prose like `a 5" image`) is skipped
/// on its own so it cannot pair up with the quotes of a real key.
pub fn extract_repeated_blocks(
    text: &str,
    field_name: &str,
) -> Result<Vec<ValidationResult>, ExtractError> {
    let cleaned = strip_code_fences(text);
    let bytes = cleaned.as_bytes();
    let mut results = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'"' || !matches!(previous_token(bytes, pos), Some(b'{' | b',')) {
            pos += 1;
            continue;
        }
        let Some(key_end) = string_end(bytes, pos) else {
            pos += 1;
            continue;
        };
        let colon = skip_whitespace(bytes, key_end);
        if bytes.get(colon) != Some(&b':') {
            pos += 1;
            continue;
        }
        let key = &cleaned[pos + 1..key_end - 1];
        let open = skip_whitespace(bytes, colon + 1);

        if key != field_name || bytes.get(open) != Some(&b'{') {
            // Step over a string value so its commas never look like key starts.
            pos = match bytes.get(open) {
                Some(b'"') => string_end(bytes, open).unwrap_or(open + 1),
                _ => open,
            };
            continue;
        }
        let close = object_end(bytes, open).ok_or_else(|| {
            ExtractError::malformed(format!("unterminated \"{field_name}\" object"), text)
        })?;

        let verdict: Verdict = serde_json::from_str(&cleaned[open..close]).map_err(|e| {
            ExtractError::malformed(format!("invalid \"{field_name}\" entry: {e}"), text)
        })?;
        let explanation = verdict
            .explanation
            .filter(|e| !verdict.follows && !e.trim().is_empty());
        results.push(ValidationResult {
            field_name: field_name.to_string(),
            follows: verdict.follows,
            uid: verdict.uid,
            explanation,
        });
        pos = close;
    }

    Ok(results)
}

/// Index just past the closing quote of the string starting at `start`.
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Index just past the `}` that balances the `{` at `open`.
fn object_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = string_end(bytes, i)?;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// The last non-whitespace byte before `pos`.
fn previous_token(bytes: &[u8], pos: usize) -> Option<u8> {
    bytes[..pos]
        .iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace())
        .copied()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}
