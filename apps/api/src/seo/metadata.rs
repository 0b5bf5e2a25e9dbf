use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extract::{extract_json_object, validate_required_string_fields, ExtractError};

/// Key of the SEO sub-object inside a story's content.
pub const SEO_KEY: &str = "SEO";

#[derive(Debug, Clone, Copy)]
pub struct SeoField {
    pub name: &'static str,
    /// Budget given to the model. Not enforced.
    pub max_chars: usize,
}

pub const SEO_FIELDS: [SeoField; 6] = [
    SeoField { name: "title", max_chars: 60 },
    SeoField { name: "description", max_chars: 160 },
    SeoField { name: "og_title", max_chars: 60 },
    SeoField { name: "og_description", max_chars: 200 },
    SeoField { name: "twitter_title", max_chars: 70 },
    SeoField { name: "twitter_description", max_chars: 200 },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub twitter_title: String,
    pub twitter_description: String,
}

impl SeoMetadata {
    /// Parses and validates a model reply into the six metadata fields.
    pub fn from_model_reply(reply: &str) -> Result<Self, ExtractError> {
        let object = extract_json_object(reply)?;
        let names = SEO_FIELDS.map(|f| f.name);
        validate_required_string_fields(&object, &names)?;
        serde_json::from_value(Value::Object(object))
            .map_err(|e| ExtractError::malformed(format!("invalid SEO metadata: {e}"), reply))
    }

    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("og_title", self.og_title.as_str()),
            ("og_description", self.og_description.as_str()),
            ("twitter_title", self.twitter_title.as_str()),
            ("twitter_description", self.twitter_description.as_str()),
        ]
    }
}

/// Writes the metadata into `content["SEO"]` and returns the merged SEO object.
///
/// Keys the metadata does not name (images, plugin markers) are left untouched.
/// A missing or non-object `SEO` value is replaced by a fresh object.
pub fn merge_seo(content: &mut Map<String, Value>, metadata: &SeoMetadata) -> Value {
    let seo = content
        .entry(SEO_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !seo.is_object() {
        *seo = Value::Object(Map::new());
    }
    if let Some(fields) = seo.as_object_mut() {
        for (name, value) in metadata.fields() {
            fields.insert(name.to_string(), Value::String(value.to_string()));
        }
    }
    seo.clone()
}
