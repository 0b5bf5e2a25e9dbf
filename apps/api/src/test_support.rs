//! In-memory `CmsApi` / `ChatModel` fakes and router helpers for handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::cms::{CmsApi, CmsError, NewDiscussion, Story};
use crate::config::Config;
use crate::extract::AssetUrlMatcher;
use crate::llm_client::{ChatMessage, ChatModel, LlmError};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum CmsCall {
    GetStory(String),
    UpdateAssetAlt {
        asset_id: u64,
        alt: String,
    },
    UpdateStoryContent {
        story_id: u64,
        content: Value,
        publish: bool,
    },
    CreateDiscussion {
        story_id: u64,
        discussion: NewDiscussion,
    },
}

#[derive(Default)]
pub struct FakeCms {
    stories: HashMap<String, Story>,
    failing_discussion_uids: HashSet<String>,
    calls: Mutex<Vec<CmsCall>>,
}

impl FakeCms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_story(mut self, slug: &str, id: u64, content: Value) -> Self {
        self.stories.insert(
            slug.to_string(),
            Story {
                id,
                name: slug.to_string(),
                full_slug: slug.to_string(),
                content,
            },
        );
        self
    }

    /// Discussions on this block uid fail with a 422.
    pub fn failing_discussion_for(mut self, uid: &str) -> Self {
        self.failing_discussion_uids.insert(uid.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CmsCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CmsCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CmsApi for FakeCms {
    async fn get_story(&self, slug: &str) -> Result<Story, CmsError> {
        self.record(CmsCall::GetStory(slug.to_string()));
        self.stories.get(slug).cloned().ok_or(CmsError::Api {
            status: 404,
            body: "This record could not be found".to_string(),
        })
    }

    async fn update_asset_alt(&self, asset_id: u64, alt: &str) -> Result<Value, CmsError> {
        self.record(CmsCall::UpdateAssetAlt {
            asset_id,
            alt: alt.to_string(),
        });
        Ok(json!({ "id": asset_id, "alt": alt }))
    }

    async fn update_story_content(
        &self,
        story_id: u64,
        content: &Value,
        publish: bool,
    ) -> Result<Value, CmsError> {
        self.record(CmsCall::UpdateStoryContent {
            story_id,
            content: content.clone(),
            publish,
        });
        Ok(json!({ "story": { "id": story_id, "content": content } }))
    }

    async fn create_discussion(
        &self,
        story_id: u64,
        discussion: &NewDiscussion,
    ) -> Result<Value, CmsError> {
        self.record(CmsCall::CreateDiscussion {
            story_id,
            discussion: discussion.clone(),
        });
        if self.failing_discussion_uids.contains(&discussion.block_uid) {
            return Err(CmsError::Api {
                status: 422,
                body: "block_uid is invalid".to_string(),
            });
        }
        Ok(json!({ "discussion": { "id": 1 } }))
    }
}

/// A model that returns a fixed reply, or a 500 when built with `failing`.
pub struct FakeModel {
    reply: Option<String>,
    requests: Mutex<Vec<(Vec<ChatMessage>, u32)>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Vec<ChatMessage>, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push((messages, max_tokens));
        self.reply.clone().ok_or(LlmError::Api {
            status: 500,
            message: "The server had an error while processing your request".to_string(),
        })
    }
}

pub fn test_config() -> Config {
    Config {
        storyblok_management_token: "mgmt-token".to_string(),
        storyblok_access_token: "access-token".to_string(),
        storyblok_space_id: "12345".to_string(),
        storyblok_region: "us".to_string(),
        cms_asset_domain: "example.com".to_string(),
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "https://api.openai.com/v1".to_string(),
        openai_model: "gpt-4o".to_string(),
        styleguide_story: "styleguide".to_string(),
        publish_on_update: true,
        port: 8080,
        rust_log: "info".to_string(),
    }
}

pub fn test_state(cms: Arc<FakeCms>, llm: Arc<FakeModel>) -> AppState {
    let config = test_config();
    AppState {
        cms,
        llm,
        asset_urls: AssetUrlMatcher::new(&config.cms_asset_domain).unwrap(),
        config,
    }
}

/// Sends a JSON POST through the full router and returns status and JSON body.
pub async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Concatenated text parts of a recorded request.
pub fn request_text(messages: &[ChatMessage]) -> String {
    use crate::llm_client::ContentPart;
    messages
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_str()),
            ContentPart::ImageUrl { .. } => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
