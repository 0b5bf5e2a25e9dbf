use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::ValidationResult;
use crate::state::AppState;
use crate::styleguide::validator::{post_discussions, validate_story, DiscussionSummary};

/// Story context of the tool panel that triggered the check.
#[derive(Debug, Deserialize)]
pub struct ValidateStoryRequest {
    #[serde(default)]
    pub story_id: Option<u64>,
    #[serde(default)]
    pub full_slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateStoryResponse {
    pub results: Vec<ValidationResult>,
    pub discussions: DiscussionSummary,
}

/// POST /api/v1/styleguide/validate
///
/// Checks the story against the styleguide and opens a discussion on every
/// field that does not follow it.
pub async fn handle_validate_story(
    State(state): State<AppState>,
    Json(request): Json<ValidateStoryRequest>,
) -> Result<Json<ValidateStoryResponse>, AppError> {
    let story_id = request
        .story_id
        .ok_or_else(|| AppError::Validation("story_id is required".to_string()))?;
    let full_slug = request
        .full_slug
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("full_slug is required".to_string()))?;

    let results = validate_story(
        state.cms.as_ref(),
        state.llm.as_ref(),
        &state.config.styleguide_story,
        &full_slug,
    )
    .await?;
    let discussions = post_discussions(state.cms.as_ref(), story_id, &results).await;

    Ok(Json(ValidateStoryResponse {
        results,
        discussions,
    }))
}
