//! Polyglot Translator - multi-provider LLM translation library
//!
//! This library routes sentences to hosted LLM providers (OpenAI, Mistral,
//! Anthropic) with a bounded retry policy, and ships a batch evaluation
//! harness that scores translation quality against reference corpora using
//! BLEU and chrF metrics.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod eval;
pub mod providers;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    config::TranslatorConfig,
    errors::TranslationError,
    models::{LlmId, ProviderKind, TranslationRequest, TranslationResult},
    router::{RetryPolicy, TranslationRouter},
};

pub use crate::eval::runner::SentenceTranslator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
