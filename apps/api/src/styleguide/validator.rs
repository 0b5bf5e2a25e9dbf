//! Styleguide validation: styleguide + story → model verdicts → discussions.
//!
//! Discussion posting is best-effort. Every non-conforming field gets one
//! attempt, a failure never stops the remaining fields, and the caller gets
//! a per-field outcome plus totals.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cms::{CmsApi, NewDiscussion};
use crate::errors::AppError;
use crate::extract::{extract_content_blocks, ValidationResult};
use crate::llm_client::{ChatMessage, ChatModel};
use crate::styleguide::prompts::{build_validation_prompt, VALIDATION_MAX_TOKENS};

/// Posted when the model flags a field but gives no reason.
pub const FALLBACK_EXPLANATION: &str = "This field does not follow the styleguide.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussionOutcome {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "_uid")]
    pub uid: String,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscussionSummary {
    pub attempted: usize,
    pub created: usize,
    pub failed: usize,
    pub outcomes: Vec<DiscussionOutcome>,
}

/// Fetches the styleguide and the story, and asks the model for per-field verdicts.
pub async fn validate_story(
    cms: &dyn CmsApi,
    llm: &dyn ChatModel,
    styleguide_story: &str,
    full_slug: &str,
) -> Result<Vec<ValidationResult>, AppError> {
    let styleguide = cms.get_story(styleguide_story).await?;
    let story = cms.get_story(full_slug).await?;

    let blocks = story.content.get("bloks").unwrap_or(&story.content);
    let prompt = build_validation_prompt(
        &to_json(blocks)?,
        &to_json(&styleguide.content)?,
    );

    let reply = llm
        .complete(vec![ChatMessage::user_text(prompt)], VALIDATION_MAX_TOKENS)
        .await?;
    let results = extract_content_blocks(&reply)?;

    info!(
        "Styleguide check of '{}' ({}): {} fields, {} not following",
        story.name,
        story.full_slug,
        results.len(),
        results.iter().filter(|r| !r.follows).count()
    );
    Ok(results)
}

/// Opens one discussion per non-conforming result and reports what happened.
pub async fn post_discussions(
    cms: &dyn CmsApi,
    story_id: u64,
    results: &[ValidationResult],
) -> DiscussionSummary {
    let mut summary = DiscussionSummary::default();

    for result in results.iter().filter(|r| !r.follows) {
        let discussion = NewDiscussion {
            field_name: result.field_name.clone(),
            block_uid: result.uid.clone(),
            message: result
                .explanation
                .clone()
                .unwrap_or_else(|| FALLBACK_EXPLANATION.to_string()),
        };

        summary.attempted += 1;
        let error = match cms.create_discussion(story_id, &discussion).await {
            Ok(_) => {
                summary.created += 1;
                None
            }
            Err(e) => {
                warn!(
                    "Failed to create discussion for block {} on story {story_id}: {e}",
                    result.uid
                );
                summary.failed += 1;
                Some(e.to_string())
            }
        };
        summary.outcomes.push(DiscussionOutcome {
            field_name: discussion.field_name,
            uid: discussion.block_uid,
            created: error.is_none(),
            error,
        });
    }

    info!(
        "Created {} discussions on story {story_id} ({} failed)",
        summary.created, summary.failed
    );
    summary
}

fn to_json(value: &Value) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(e.into()))
}
