use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub storyblok_management_token: String,
    pub storyblok_access_token: String,
    pub storyblok_space_id: String,
    pub storyblok_region: String,
    /// Domain of the asset CDN, e.g. `storyblok.com` for `a-us.storyblok.com`.
    pub cms_asset_domain: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Slug or numeric id of the story holding the styleguide.
    pub styleguide_story: String,
    pub publish_on_update: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            storyblok_management_token: require_env("STORYBLOK_MANAGEMENT_TOKEN")?,
            storyblok_access_token: require_env("STORYBLOK_ACCESS_TOKEN")?,
            storyblok_space_id: require_env("STORYBLOK_SPACE_ID")?,
            storyblok_region: env_or("STORYBLOK_REGION", "us"),
            cms_asset_domain: env_or("CMS_ASSET_DOMAIN", "storyblok.com"),
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            styleguide_story: require_env("STYLEGUIDE_STORY")?,
            publish_on_update: parse_flag(&env_or("PUBLISH_ON_UPDATE", "true"))
                .context("PUBLISH_ON_UPDATE must be true or false")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Base URL for the read-only content delivery API.
    pub fn cdn_base_url(&self) -> String {
        match self.storyblok_region.as_str() {
            "eu" => "https://api.storyblok.com/v2".to_string(),
            region => format!("https://api-{region}.storyblok.com/v2"),
        }
    }

    /// Base URL for the management API used for all writes.
    pub fn management_base_url(&self) -> String {
        match self.storyblok_region.as_str() {
            "eu" => "https://mapi.storyblok.com/v1".to_string(),
            region => format!("https://api-{region}.storyblok.com/v1"),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
