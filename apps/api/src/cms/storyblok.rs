use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{CmsApi, CmsError, NewDiscussion, Story};

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Deserialize)]
struct StoryEnvelope {
    story: Story,
}

/// Storyblok client: content delivery API for reads, management API for writes.
#[derive(Clone)]
pub struct StoryblokClient {
    client: Client,
    cdn_base_url: String,
    management_base_url: String,
    access_token: String,
    management_token: String,
    space_id: String,
}

impl StoryblokClient {
    pub fn new(
        cdn_base_url: String,
        management_base_url: String,
        access_token: String,
        management_token: String,
        space_id: String,
    ) -> Result<Self, CmsError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            cdn_base_url,
            management_base_url,
            access_token,
            management_token,
            space_id,
        })
    }

    fn space_url(&self, path: &str) -> String {
        format!(
            "{}/spaces/{}/{}",
            self.management_base_url,
            self.space_id,
            path.trim_start_matches('/')
        )
    }

    fn management(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", &self.management_token)
    }

    /// Sends a request and returns the JSON body; an empty body becomes `Value::Null`.
    async fn send(&self, request: RequestBuilder) -> Result<Value, CmsError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CmsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CmsApi for StoryblokClient {
    async fn get_story(&self, slug: &str) -> Result<Story, CmsError> {
        let url = format!(
            "{}/cdn/stories/{}",
            self.cdn_base_url,
            slug.trim_start_matches('/')
        );
        debug!("Fetching published story '{slug}'");
        let body = self
            .send(
                self.client
                    .get(url)
                    .query(&[("version", "published"), ("token", self.access_token.as_str())]),
            )
            .await?;
        let envelope: StoryEnvelope = serde_json::from_value(body)?;
        Ok(envelope.story)
    }

    async fn update_asset_alt(&self, asset_id: u64, alt: &str) -> Result<Value, CmsError> {
        let url = self.space_url(&format!("assets/{asset_id}"));
        self.send(
            self.management(self.client.put(url))
                .json(&json!({ "asset": { "alt": alt } })),
        )
        .await
    }

    async fn update_story_content(
        &self,
        story_id: u64,
        content: &Value,
        publish: bool,
    ) -> Result<Value, CmsError> {
        let url = self.space_url(&format!("stories/{story_id}"));
        let mut body = json!({ "story": { "content": content } });
        if publish {
            body["publish"] = json!(1);
        }
        self.send(self.management(self.client.put(url)).json(&body))
            .await
    }

    async fn create_discussion(
        &self,
        story_id: u64,
        discussion: &NewDiscussion,
    ) -> Result<Value, CmsError> {
        let url = self.space_url(&format!("stories/{story_id}/discussions"));
        self.send(
            self.management(self.client.post(url))
                .json(&discussion.to_body()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StoryblokClient {
        StoryblokClient::new(
            "https://api-us.storyblok.com/v2".to_string(),
            "https://api-us.storyblok.com/v1".to_string(),
            "access".to_string(),
            "mgmt".to_string(),
            "12345".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_space_url() {
        assert_eq!(
            client().space_url("/stories/9/discussions"),
            "https://api-us.storyblok.com/v1/spaces/12345/stories/9/discussions"
        );
    }

    #[test]
    fn test_story_envelope() {
        let envelope: StoryEnvelope = serde_json::from_str(
            r#"{"story": {"id": 3, "full_slug": "blog/post", "content": {"component": "post"}}}"#,
        )
        .unwrap();
        assert_eq!(envelope.story.id, 3);
        assert_eq!(envelope.story.name, "");
    }
}
