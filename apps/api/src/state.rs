use std::sync::Arc;

use crate::cms::CmsApi;
use crate::config::Config;
use crate::extract::AssetUrlMatcher;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub cms: Arc<dyn CmsApi>,
    pub llm: Arc<dyn ChatModel>,
    /// Compiled once from `Config::cms_asset_domain`.
    pub asset_urls: AssetUrlMatcher,
    pub config: Config,
}
