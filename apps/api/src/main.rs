mod alt_text;
mod cms;
mod config;
mod errors;
mod extract;
mod llm_client;
mod routes;
mod seo;
mod state;
mod styleguide;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cms::StoryblokClient;
use crate::config::Config;
use crate::extract::AssetUrlMatcher;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cms-assist v{}", env!("CARGO_PKG_VERSION"));

    let cms = StoryblokClient::new(
        config.cdn_base_url(),
        config.management_base_url(),
        config.storyblok_access_token.clone(),
        config.storyblok_management_token.clone(),
        config.storyblok_space_id.clone(),
    )?;
    info!(
        "CMS client initialized (space {}, region {})",
        config.storyblok_space_id, config.storyblok_region
    );

    let llm = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let asset_urls = AssetUrlMatcher::new(&config.cms_asset_domain)?;

    let state = AppState {
        cms: Arc::new(cms),
        llm: Arc::new(llm),
        asset_urls,
        config: config.clone(),
    };

    // The tool panel runs inside the CMS UI on another origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
