pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::alt_text::handlers::handle_alt_text_webhook;
use crate::seo::handlers::handle_seo_webhook;
use crate::state::AppState;
use crate::styleguide::handlers::handle_validate_story;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CMS webhooks
        .route("/webhooks/alt-text", post(handle_alt_text_webhook))
        .route("/webhooks/seo", post(handle_seo_webhook))
        // Tool panel
        .route(
            "/api/v1/styleguide/validate",
            post(handle_validate_story),
        )
        .with_state(state)
}
