//! Translation routing with bounded fixed-delay retry
//!
//! The router owns one client per provider and dispatches on the parsed
//! model identifier. A single retry policy is applied at the dispatch
//! boundary: fixed delay, bounded attempt count, no jitter, no backoff.
//! Any error from the underlying call is logged and counts as a failed
//! attempt; callers only ever observe presence or absence of a translation.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::core::cleanup::clean_response;
use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::models::{LlmId, ProviderKind, TranslationRequest, TranslationResult};
use crate::providers::anthropic::AnthropicClient;
use crate::providers::mistral::MistralClient;
use crate::providers::openai::OpenAiClient;

/// Attempts per translate call (initial + 3 retries)
pub const MAX_ATTEMPTS: u32 = 4;

/// Delay between attempts for the OpenAI and Mistral bindings
const SHORT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Delay between attempts for the Anthropic binding
const LONG_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Bounded fixed-delay retry policy, applied once at the dispatch boundary.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the initial one
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// The policy for a provider binding.
    pub fn for_provider(provider: ProviderKind) -> Self {
        match provider {
            ProviderKind::OpenAi | ProviderKind::Mistral => {
                Self::new(MAX_ATTEMPTS, SHORT_RETRY_DELAY)
            }
            ProviderKind::Anthropic => Self::new(MAX_ATTEMPTS, LONG_RETRY_DELAY),
        }
    }
}

/// Translation router holding one client per provider
#[derive(Debug, Clone)]
pub struct TranslationRouter {
    /// OpenAI binding
    openai: OpenAiClient,
    /// Mistral binding
    mistral: MistralClient,
    /// Anthropic binding
    anthropic: AnthropicClient,
}

impl TranslationRouter {
    /// Create a router from configuration.
    pub fn new(config: &TranslatorConfig) -> Self {
        if !config.has_credentials() {
            warn!("No provider API keys configured; all translation calls will fail");
        }
        Self {
            openai: OpenAiClient::new(&config.openai_api_key, &config.openai_api_base),
            mistral: MistralClient::new(&config.mistral_api_key, &config.mistral_api_base),
            anthropic: AnthropicClient::new(&config.anthropic_api_key, &config.anthropic_api_base),
        }
    }

    /// Create a router from environment configuration.
    pub fn from_env() -> Self {
        Self::new(&TranslatorConfig::from_env())
    }

    /// Build the instruction string sent to the provider.
    pub fn build_instructions(sentence: &str, source: &str, destination: &str) -> String {
        format!(
            "Translate the following sentence from {source} to {destination}. \
             The sentence is as follows: {sentence}. \
             Respond only with the translation."
        )
        .trim()
        .to_string()
    }

    /// Translate a single request.
    ///
    /// Returns an absent result for unrecognized model identifiers (zero
    /// underlying calls) and when every attempt failed.
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        let Some(llm) = LlmId::parse(&request.llm) else {
            warn!("Unrecognized model identifier: {:?}", request.llm);
            return TranslationResult::absent();
        };

        let instructions =
            Self::build_instructions(&request.sentence, &request.source, &request.destination);
        let policy = RetryPolicy::for_provider(llm.provider());

        for attempt in 1..=policy.max_attempts {
            if attempt > 1 {
                sleep(policy.delay).await;
            }
            match self.dispatch(llm, &instructions).await {
                Ok(text) => {
                    debug!("[{}] translated on attempt {}", llm, attempt);
                    return TranslationResult::from_text(clean_response(&text));
                }
                Err(e) => {
                    warn!("[{}] attempt {} failed: {}", llm, attempt, e);
                }
            }
        }

        warn!("[{}] all {} attempts failed", llm, policy.max_attempts);
        TranslationResult::absent()
    }

    /// Send one request to the provider binding for `llm`.
    async fn dispatch(&self, llm: LlmId, instructions: &str) -> Result<String> {
        match llm.provider() {
            ProviderKind::OpenAi => {
                self.openai
                    .complete(llm.as_str(), llm.max_tokens(), instructions)
                    .await
            }
            ProviderKind::Mistral => {
                self.mistral
                    .complete(llm.as_str(), llm.max_tokens(), instructions)
                    .await
            }
            ProviderKind::Anthropic => {
                self.anthropic
                    .complete(llm.as_str(), llm.max_tokens(), instructions)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_instructions_exact_format() {
        let instructions =
            TranslationRouter::build_instructions("The cat sat on the mat.", "English", "French");
        assert_eq!(
            instructions,
            "Translate the following sentence from English to French. \
             The sentence is as follows: The cat sat on the mat.. \
             Respond only with the translation."
        );
    }

    #[test]
    fn test_unknown_identifier_yields_absent_without_any_call() {
        let router = TranslationRouter::new(&TranslatorConfig::default());
        let request = TranslationRequest::new("Hello", "English", "French", "gpt-99");
        let result = tokio_test::block_on(router.translate(&request));
        assert!(result.translation.is_none());
    }

    #[test]
    fn test_retry_policies() {
        let policy = RetryPolicy::for_provider(ProviderKind::OpenAi);
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.delay, Duration::from_millis(100));

        let policy = RetryPolicy::for_provider(ProviderKind::Anthropic);
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }
}
