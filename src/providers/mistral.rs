//! Mistral chat completions client
//!
//! Mistral's chat API is wire-compatible with the OpenAI chat completions
//! schema, so the request/response types are shared with the OpenAI client.
//! Requests carry a single user message.

use reqwest::Client;

use crate::core::errors::{Result, TranslationError};
use crate::providers::openai::{ChatCompletionRequest, ChatCompletionResponse};
use crate::providers::ChatMessage;

/// Default Mistral endpoint base
pub const DEFAULT_API_BASE: &str = "https://api.mistral.ai/v1";

/// Sampling temperature for all calls
const TEMPERATURE: f32 = 0.0;

/// Mistral client
#[derive(Debug, Clone)]
pub struct MistralClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Endpoint base URL
    api_base: String,
}

impl MistralClient {
    /// Create a new Mistral client.
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }

    /// Complete a chat request, returning the generated text.
    pub async fn complete(&self, model: &str, max_tokens: u32, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = ChatCompletionRequest {
            model: model.to_string(),
            max_tokens,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion.into_text()
    }
}
