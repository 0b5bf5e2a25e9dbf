//! CMS access: the `CmsApi` trait and its Storyblok REST implementation.
//!
//! `AppState` holds an `Arc<dyn CmsApi>` built once at startup; handlers
//! never talk to the REST API directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod storyblok;

pub use storyblok::StoryblokClient;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A story as returned by the content delivery API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_slug: String,
    #[serde(default)]
    pub content: Value,
}

/// A discussion thread to open on one field of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscussion {
    pub field_name: String,
    pub block_uid: String,
    pub message: String,
}

impl NewDiscussion {
    /// Request body for the discussions endpoint.
    pub fn to_body(&self) -> Value {
        serde_json::json!({
            "discussion": {
                "comment": {
                    "message_json": [
                        { "type": "text", "text": self.message }
                    ]
                },
                "lang": "default",
                "title": self.field_name,
                "fieldname": self.field_name,
                "block_uid": self.block_uid,
                "component": "RichText"
            }
        })
    }
}

#[async_trait]
pub trait CmsApi: Send + Sync {
    /// Fetches the published version of a story by slug (or numeric id).
    async fn get_story(&self, slug: &str) -> Result<Story, CmsError>;

    /// Sets the `alt` text of an asset. Returns the CMS response body.
    async fn update_asset_alt(&self, asset_id: u64, alt: &str) -> Result<Value, CmsError>;

    /// Replaces a story's content. Returns the CMS response body.
    async fn update_story_content(
        &self,
        story_id: u64,
        content: &Value,
        publish: bool,
    ) -> Result<Value, CmsError>;

    /// Opens a discussion on a story field. Returns the CMS response body.
    async fn create_discussion(
        &self,
        story_id: u64,
        discussion: &NewDiscussion,
    ) -> Result<Value, CmsError>;
}
