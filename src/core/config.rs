//! Configuration management
//!
//! Credentials and endpoint overrides are read from the process environment
//! once at startup and carried in an explicit struct that is handed to the
//! router at construction time. An empty credential is valid: calls to that
//! provider simply fail and exhaust their retries.

use crate::providers::{anthropic, mistral, openai};

/// Configuration for the translation router
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// OpenAI API key (`OPENAI_API_KEY`)
    pub openai_api_key: String,
    /// Mistral API key (`MISTRAL_API_KEY`)
    pub mistral_api_key: String,
    /// Anthropic API key (`ANTHROPIC_API_KEY`)
    pub anthropic_api_key: String,
    /// OpenAI endpoint base (`OPENAI_API_BASE`)
    pub openai_api_base: String,
    /// Mistral endpoint base (`MISTRAL_API_BASE`)
    pub mistral_api_base: String,
    /// Anthropic endpoint base (`ANTHROPIC_API_BASE`)
    pub anthropic_api_base: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            mistral_api_key: String::new(),
            anthropic_api_key: String::new(),
            openai_api_base: openai::DEFAULT_API_BASE.to_string(),
            mistral_api_base: mistral::DEFAULT_API_BASE.to_string(),
            anthropic_api_base: anthropic::DEFAULT_API_BASE.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            mistral_api_key: std::env::var("MISTRAL_API_KEY").unwrap_or_default(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            openai_api_base: std::env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| openai::DEFAULT_API_BASE.to_string()),
            mistral_api_base: std::env::var("MISTRAL_API_BASE")
                .unwrap_or_else(|_| mistral::DEFAULT_API_BASE.to_string()),
            anthropic_api_base: std::env::var("ANTHROPIC_API_BASE")
                .unwrap_or_else(|_| anthropic::DEFAULT_API_BASE.to_string()),
        }
    }

    /// Whether at least one provider credential is configured.
    pub fn has_credentials(&self) -> bool {
        !self.openai_api_key.is_empty()
            || !self.mistral_api_key.is_empty()
            || !self.anthropic_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credentials() {
        let config = TranslatorConfig::default();
        assert!(!config.has_credentials());
        assert_eq!(config.openai_api_base, "https://api.openai.com/v1");
        assert_eq!(config.mistral_api_base, "https://api.mistral.ai/v1");
        assert_eq!(config.anthropic_api_base, "https://api.anthropic.com");
    }

    #[test]
    fn test_any_single_key_counts_as_credentials() {
        let config = TranslatorConfig {
            mistral_api_key: "test_key".to_string(),
            ..Default::default()
        };
        assert!(config.has_credentials());
    }
}
