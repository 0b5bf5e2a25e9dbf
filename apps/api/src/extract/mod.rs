//! Response Extractor: turns free-form model replies into typed data.
//!
//! Models wrap JSON in prose and code fences, and sometimes emit repeated
//! keys that no JSON parser accepts. Everything here tolerates that noise
//! and reports failures as `ExtractError` so handlers can map them to a
//! response without guessing.

use thiserror::Error;

pub mod blocks;
pub mod fields;
pub mod image_url;
pub mod json_object;

pub use blocks::{extract_content_blocks, ValidationResult};
pub use fields::validate_required_string_fields;
pub use image_url::AssetUrlMatcher;
pub use json_object::extract_json_object;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("malformed model output: {reason}")]
    MalformedModelOutput { reason: String, raw: String },

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

impl ExtractError {
    pub(crate) fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        ExtractError::MalformedModelOutput {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// Removes every ```json / ``` fence marker, wherever it appears.
pub(crate) fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
