//! Core data models for translation routing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hosted provider behind a model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI chat completions API
    OpenAi,
    /// Mistral chat completions API
    Mistral,
    /// Anthropic messages API
    Anthropic,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Mistral => write!(f, "mistral"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Provider/model identifier, matched exactly against a closed enumeration.
///
/// Anything outside this enumeration is rejected by [`LlmId::parse`] and the
/// router performs no underlying call for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmId {
    /// OpenAI gpt-4o
    Gpt4o,
    /// OpenAI gpt-4o-mini
    Gpt4oMini,
    /// OpenAI gpt-3.5-turbo
    Gpt35Turbo,
    /// Mistral large, latest revision
    MistralLarge,
    /// Mistral small, latest revision
    MistralSmall,
    /// Anthropic Claude 3.5 Sonnet
    Claude35Sonnet,
}

impl LlmId {
    /// Parse a model identifier by exact string match.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "gpt-4o" => Some(LlmId::Gpt4o),
            "gpt-4o-mini" => Some(LlmId::Gpt4oMini),
            "gpt-3.5-turbo" => Some(LlmId::Gpt35Turbo),
            "mistral-large-latest" => Some(LlmId::MistralLarge),
            "mistral-small-latest" => Some(LlmId::MistralSmall),
            "claude-3-5-sonnet-20240620" => Some(LlmId::Claude35Sonnet),
            _ => None,
        }
    }

    /// The identifier string sent to the provider as the model name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmId::Gpt4o => "gpt-4o",
            LlmId::Gpt4oMini => "gpt-4o-mini",
            LlmId::Gpt35Turbo => "gpt-3.5-turbo",
            LlmId::MistralLarge => "mistral-large-latest",
            LlmId::MistralSmall => "mistral-small-latest",
            LlmId::Claude35Sonnet => "claude-3-5-sonnet-20240620",
        }
    }

    /// Which hosted API serves this model.
    pub fn provider(&self) -> ProviderKind {
        match self {
            LlmId::Gpt4o | LlmId::Gpt4oMini | LlmId::Gpt35Turbo => ProviderKind::OpenAi,
            LlmId::MistralLarge | LlmId::MistralSmall => ProviderKind::Mistral,
            LlmId::Claude35Sonnet => ProviderKind::Anthropic,
        }
    }

    /// Response token budget for this model.
    pub fn max_tokens(&self) -> u32 {
        match self {
            LlmId::Gpt4o | LlmId::Gpt4oMini => 16384,
            LlmId::Gpt35Turbo => 4000,
            LlmId::MistralLarge => 7900,
            LlmId::MistralSmall => 4000,
            LlmId::Claude35Sonnet => 7900,
        }
    }
}

impl fmt::Display for LlmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Translation request, constructed and discarded per call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Sentence to translate
    pub sentence: String,
    /// Source language name (e.g. "English")
    pub source: String,
    /// Destination language name (e.g. "French")
    pub destination: String,
    /// Provider/model identifier string
    pub llm: String,
}

impl TranslationRequest {
    /// Create a new translation request.
    pub fn new(
        sentence: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        llm: impl Into<String>,
    ) -> Self {
        Self {
            sentence: sentence.into(),
            source: source.into(),
            destination: destination.into(),
            llm: llm.into(),
        }
    }
}

/// Translation result. An absent translation signals total failure after
/// retries were exhausted; callers observe only presence/absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationResult {
    /// The translated text, or `None` when every attempt failed
    pub translation: Option<String>,
}

impl TranslationResult {
    /// Successful result carrying the translated text.
    pub fn from_text(translation: impl Into<String>) -> Self {
        Self {
            translation: Some(translation.into()),
        }
    }

    /// Absent result: all attempts exhausted or the identifier was unknown.
    pub fn absent() -> Self {
        Self { translation: None }
    }

    /// Whether a translation is present.
    pub fn is_translated(&self) -> bool {
        self.translation.is_some()
    }
}
