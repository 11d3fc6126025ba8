//! Anthropic messages client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TranslationError};
use crate::providers::ChatMessage;

/// Default Anthropic endpoint base
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// API version header value required by the messages endpoint
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sampling temperature for all calls
const TEMPERATURE: f32 = 0.0;

/// Anthropic messages request
#[derive(Debug, Serialize)]
struct MessagesRequest {
    /// The model to use
    model: String,
    /// Maximum number of tokens to generate
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// The messages for the conversation
    messages: Vec<ChatMessage>,
}

/// Anthropic messages response
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    /// Content blocks of the response
    content: Vec<ContentBlock>,
}

/// Individual content block in a messages response
#[derive(Debug, Deserialize)]
struct ContentBlock {
    /// The type of content
    #[serde(rename = "type")]
    block_type: String,
    /// The actual text content
    #[serde(default)]
    text: String,
}

impl MessagesResponse {
    /// Concatenate the text blocks of the response.
    fn into_text(self) -> Result<String> {
        let text: String = self
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(TranslationError::InvalidResponseError {
                message: "response contained no text content".to_string(),
            });
        }
        Ok(text)
    }
}

/// Anthropic client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Endpoint base URL
    api_base: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client.
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }

    /// Complete a messages request, returning the generated text.
    pub async fn complete(&self, model: &str, max_tokens: u32, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

        let messages: MessagesResponse = response.json().await?;
        messages.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{"content":[{"type":"text","text":"Bonjour"},{"type":"text","text":" le monde"}]}"#;
        let response: MessagesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "Bonjour le monde");
    }

    #[test]
    fn test_non_text_blocks_are_ignored() {
        let body = r#"{"content":[{"type":"tool_use"},{"type":"text","text":"Bonjour"}]}"#;
        let response: MessagesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "Bonjour");
    }

    #[test]
    fn test_empty_content_is_an_error() {
        let response: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(response.into_text().is_err());
    }
}
