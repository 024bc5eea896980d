//! Reasoning-service client
//!
//! Provides the interface to the external multimodal LLM endpoint that
//! performs the actual policy judgment. The service is treated as an opaque
//! capability: given a system instruction and a user message with optional
//! image, return text, possibly malformed.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::model::request::ImageRef;

/// Default model for compliance analysis
pub const DEFAULT_MODEL: &str = "gpt-4o";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Explicit request timeout rather than relying on transport defaults
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A single analysis turn sent to the reasoning service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_text: String,
    /// Passed through unmodified as an image content part
    pub image: Option<ImageRef>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Error type for reasoning-service calls
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReasoningError {
    #[error("reasoning service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("reasoning service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

/// Opaque multimodal reasoning capability
///
/// Implementations make exactly one upstream call per invocation and do not
/// retry.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Returns the raw completion text, or `None` when the service produced
    /// no text content.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, ReasoningError>;
}

/// Chat-completions client for the OpenAI API
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl OpenAiClient {
    /// Create a client against the default API endpoint
    pub fn new(api_key: &str, model: &str) -> Result<Self, ReasoningError> {
        Self::with_base_url(api_key, model, Url::parse(DEFAULT_BASE_URL).unwrap())
    }

    /// Create a client against an alternate endpoint (proxies, test servers)
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        base_url: Url,
    ) -> Result<Self, ReasoningError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url,
            model: model.to_string(),
        })
    }

    /// Build the chat-completions body: one system message and one user
    /// message composed of a text part and, optionally, one image part.
    fn build_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut content = vec![json!({
            "type": "text",
            "text": request.user_text,
        })];

        if let Some(image) = &request.image {
            content.push(json!({
                "type": "image_url",
                "image_url": {
                    "url": image.as_image_url(),
                    "detail": "high",
                },
            }));
        }

        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": content },
            ],
            "response_format": { "type": "json_object" },
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        })
    }
}

#[async_trait]
impl ReasoningClient for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, ReasoningError> {
        let endpoint = format!(
            "{}/chat/completions",
            self.base_url.as_str().trim_end_matches('/')
        );

        tracing::debug!(model = %self.model, "Sending chat completion request");

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_api_error(&body).unwrap_or(body);
            return Err(ReasoningError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = response.json().await?;
        let content = payload
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(content)
    }
}

/// Pull the human-readable message out of an API error body, if present
fn extract_api_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
