//! Alt-text webhook: asset uploaded → vision model → asset `alt` field.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::alt_text::prompts::{ALT_TEXT_MAX_TOKENS, ALT_TEXT_PROMPT};
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, ChatModel};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AltTextWebhook {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub asset_id: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AltTextResponse {
    pub alt_text: String,
    pub updated_asset: Value,
}

/// POST /webhooks/alt-text
///
/// Responds 400 without calling the model or the CMS when the payload
/// carries no asset image URL.
pub async fn handle_alt_text_webhook(
    State(state): State<AppState>,
    Json(payload): Json<AltTextWebhook>,
) -> Result<Json<AltTextResponse>, AppError> {
    let image_url = payload
        .text
        .as_deref()
        .and_then(|text| state.asset_urls.find(text))
        .ok_or_else(|| AppError::NotFound("No image URL found in webhook payload".to_string()))?
        .to_string();
    let asset_id = payload
        .asset_id
        .ok_or_else(|| AppError::Validation("asset_id is required".to_string()))?;

    info!("Generating alt text for asset {asset_id} ({image_url})");
    let alt_text = generate_alt_text(state.llm.as_ref(), &image_url).await?;

    let updated_asset = state.cms.update_asset_alt(asset_id, &alt_text).await?;
    info!("Updated alt text for asset {asset_id}");

    Ok(Json(AltTextResponse {
        alt_text,
        updated_asset,
    }))
}

/// Asks the model for alt text. The reply is stored exactly as returned.
pub async fn generate_alt_text(llm: &dyn ChatModel, image_url: &str) -> Result<String, AppError> {
    let reply = llm
        .complete(
            vec![ChatMessage::user_text_with_image(ALT_TEXT_PROMPT, image_url)],
            ALT_TEXT_MAX_TOKENS,
        )
        .await?;
    Ok(reply)
}
