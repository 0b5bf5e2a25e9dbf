//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! Handlers depend on the `ChatModel` trait, never on the HTTP client, so the
//! pipelines can be exercised against an in-memory model in tests.
//!
//! Each call is single-shot: a non-success status fails the request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One part of a user message: plain text or an image the model should look at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }

    pub fn user_text_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ],
        }
    }
}

/// A chat-completion backend. Returns the text of the first choice.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Chat-completion client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the chat-completion endpoint, returning the full response object.
    pub async fn call(
        &self,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let response = self.call(messages, max_tokens).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_message_serializes_as_content_parts() {
        let message = ChatMessage::user_text_with_image("Describe", "https://a-us.example.com/x.jpg");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "Describe"},
                    {"type": "image_url", "image_url": {"url": "https://a-us.example.com/x.jpg"}}
                ]
            })
        );
    }

    #[test]
    fn test_request_carries_max_tokens() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage::user_text("hi")],
            max_tokens: 1000,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["messages"][0]["content"][0]["text"], "hi");
    }

    #[test]
    fn test_response_text_from_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "A red bicycle."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("A red bicycle."));
    }

    #[test]
    fn test_response_without_content_has_no_text() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(response.text(), None);

        let empty: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OpenAiClient::new(
            "key".to_string(),
            "https://api.openai.com/v1/".to_string(),
            "gpt-4o".to_string(),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.openai.com/v1");
        assert_eq!(client.model(), "gpt-4o");
    }
}
