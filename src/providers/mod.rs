//! Provider clients for the hosted chat-completion APIs.
//!
//! Each provider module wraps one "create chat completion" style operation:
//! - OpenAI: `POST /v1/chat/completions`
//! - Mistral: `POST /v1/chat/completions` (OpenAI-compatible schema)
//! - Anthropic: `POST /v1/messages`

use serde::{Deserialize, Serialize};

pub mod anthropic;
pub mod mistral;
pub mod openai;

/// A role/content message, shared by all three chat-style APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role: "system", "user" or "assistant"
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}
