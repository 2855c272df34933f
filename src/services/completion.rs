use crate::config::OpenAiSettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the completion API
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("upstream API error: {0}")]
    Upstream(String),

    #[error("unauthorized: invalid API key")]
    Unauthorized,

    #[error("API rejected request: {0}")]
    Api(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    /// Whether another attempt can be expected to succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Upstream(_))
    }
}

/// Text-completion capability: given a prompt, return the generated text
///
/// Sampling and length parameters are fixed per client so the evaluator
/// only ever deals in prompt-in, text-out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint
///
/// Holds the model identifier and sampling parameters; a low temperature
/// and a small response cap keep the model's answer to a bare number.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl OpenAiClient {
    /// Create a new completion client
    pub fn new(settings: &OpenAiSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            client,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        tracing::debug!("Requesting completion from: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    CompletionError::RateLimited(format!("{}: {}", status, body))
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized,
                s if s.is_server_error() => {
                    CompletionError::Upstream(format!("{}: {}", status, body))
                }
                _ => CompletionError::Api(format!("{}: {}", status, body)),
            });
        }

        let json: Value = response.json().await?;

        let content = json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                CompletionError::InvalidResponse("Missing choices[0].message.content".into())
            })?;

        Ok(content.to_string())
    }
}
