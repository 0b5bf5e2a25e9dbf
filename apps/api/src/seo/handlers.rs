//! SEO webhook: story published → model-written metadata → story `SEO` field.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ChatMessage;
use crate::seo::metadata::{merge_seo, SeoMetadata};
use crate::seo::prompts::{build_seo_prompt, SEO_MAX_TOKENS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SeoWebhook {
    #[serde(default)]
    pub story_id: Option<u64>,
    #[serde(default)]
    pub full_slug: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoResponse {
    pub message: String,
    pub story_id: u64,
    pub full_slug: String,
    pub updated_metadata: Value,
}

/// POST /webhooks/seo
pub async fn handle_seo_webhook(
    State(state): State<AppState>,
    Json(payload): Json<SeoWebhook>,
) -> Result<Json<SeoResponse>, AppError> {
    let story_id = payload
        .story_id
        .ok_or_else(|| AppError::Validation("story_id is required".to_string()))?;
    let full_slug = payload
        .full_slug
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("full_slug is required".to_string()))?;

    let story = state.cms.get_story(&full_slug).await?;
    let Value::Object(mut content) = story.content else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "story '{full_slug}' has no content object"
        )));
    };

    info!("Generating SEO metadata for story {story_id} ({full_slug})");
    let story_json = serde_json::to_string(&content).map_err(anyhow::Error::from)?;
    let reply = state
        .llm
        .complete(
            vec![ChatMessage::user_text(build_seo_prompt(&story_json))],
            SEO_MAX_TOKENS,
        )
        .await?;
    let metadata = SeoMetadata::from_model_reply(&reply)?;

    let updated_metadata = merge_seo(&mut content, &metadata);
    state
        .cms
        .update_story_content(
            story_id,
            &Value::Object(content),
            state.config.publish_on_update,
        )
        .await?;
    info!("Updated SEO metadata for story {story_id}");

    Ok(Json(SeoResponse {
        message: "SEO metadata updated".to_string(),
        story_id,
        full_slug,
        updated_metadata,
    }))
}
