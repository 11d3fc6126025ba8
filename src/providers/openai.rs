//! OpenAI chat completions client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TranslationError};
use crate::providers::ChatMessage;

/// Default OpenAI endpoint base
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Fixed system prompt for translation calls
const SYSTEM_PROMPT: &str =
    "You are a translation assistant. Follow the instructions exactly and reply with the requested text only.";

/// Sampling temperature for all calls
const TEMPERATURE: f32 = 0.0;

/// Chat completion request body. Mistral exposes the same wire schema, so
/// its client reuses these types.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Response token budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated choices; the first carries the answer
    pub choices: Vec<ChatChoice>,
}

/// One generated choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The assistant message for this choice
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Extract the text of the first choice.
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "response contained no choices".to_string(),
            })
    }
}

/// OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Endpoint base URL
    api_base: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client.
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
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_fields() {
        let request = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            max_tokens: 16384,
            temperature: 0.0,
            messages: vec![ChatMessage::user("hello")],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 16384);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_response_text_extraction() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Bonjour"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "Bonjour");
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(response.into_text().is_err());
    }
}
