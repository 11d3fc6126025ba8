//! Evaluation runs: per-sentence outcomes, pair accumulation and scoring
//!
//! One run translates the first N English sentences with a single model and
//! pairs each candidate with the reference sentence at the same index.
//! Every sentence produces an explicit outcome; skipped sentences are
//! counted rather than silently discarded, and contribute no pair, so the
//! reference and candidate sequences grow in lockstep.

use std::fmt;

use async_trait::async_trait;
use indicatif::ProgressBar;
use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::{LlmId, TranslationRequest};
use crate::core::router::TranslationRouter;
use crate::eval::metrics;

/// Source language for every evaluation run
pub const SOURCE_LANGUAGE: &str = "English";

/// Models evaluated by default
pub const EVALUATION_LLMS: &[LlmId] = &[
    LlmId::Gpt4o,
    LlmId::Gpt4oMini,
    LlmId::Gpt35Turbo,
    LlmId::MistralLarge,
    LlmId::MistralSmall,
];

/// Destination languages evaluated by default
pub const EVALUATION_LANGUAGES: &[&str] = &["French", "Chinese"];

/// Sentences translated per (model, language) run
pub const DEFAULT_SENTENCES_PER_RUN: usize = 100;

/// Anything that can translate a single sentence.
///
/// The router implements this; tests substitute deterministic stubs.
#[async_trait]
pub trait SentenceTranslator: Send + Sync {
    /// Translate one sentence, returning `None` on total failure.
    async fn translate_sentence(
        &self,
        sentence: &str,
        source: &str,
        destination: &str,
        llm: &str,
    ) -> Option<String>;
}

#[async_trait]
impl SentenceTranslator for TranslationRouter {
    async fn translate_sentence(
        &self,
        sentence: &str,
        source: &str,
        destination: &str,
        llm: &str,
    ) -> Option<String> {
        let request = TranslationRequest::new(sentence, source, destination, llm);
        self.translate(&request).await.translation
    }
}

/// Why a sentence was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The router returned no translation
    NoTranslation,
    /// The reference corpus has no sentence at this index
    MissingReference,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTranslation => write!(f, "no translation returned"),
            SkipReason::MissingReference => write!(f, "no reference sentence at this index"),
        }
    }
}

/// Outcome of evaluating one sentence
#[derive(Debug, Clone)]
pub enum SentenceOutcome {
    /// The sentence was translated; carries the aligned pair
    Translated {
        /// Reference sentence at the same index
        reference: String,
        /// Translated candidate
        candidate: String,
    },
    /// The sentence was skipped
    Skipped {
        /// Index of the sentence in the source corpus
        index: usize,
        /// Why it was skipped
        reason: SkipReason,
    },
}

/// Accumulated pairs and skips for one run
#[derive(Debug, Default)]
pub struct RunAccumulation {
    /// Reference sentences, in encounter order
    pub references: Vec<String>,
    /// Candidate translations, aligned to `references`
    pub candidates: Vec<String>,
    /// Skipped sentences with their reasons
    pub skipped: Vec<(usize, SkipReason)>,
    /// Sentences attempted
    pub attempted: usize,
}

impl RunAccumulation {
    /// Number of skipped sentences.
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }

    fn record(&mut self, outcome: SentenceOutcome) {
        match outcome {
            SentenceOutcome::Translated {
                reference,
                candidate,
            } => {
                self.references.push(reference);
                self.candidates.push(candidate);
            }
            SentenceOutcome::Skipped { index, reason } => {
                debug!("Skipping sentence {}: {}", index, reason);
                self.skipped.push((index, reason));
            }
        }
    }
}

/// Evaluate one sentence against the references at its index.
async fn evaluate_sentence<T: SentenceTranslator + ?Sized>(
    translator: &T,
    llm: &str,
    language: &str,
    index: usize,
    sentence: &str,
    references: &[String],
) -> SentenceOutcome {
    let Some(reference) = references.get(index) else {
        return SentenceOutcome::Skipped {
            index,
            reason: SkipReason::MissingReference,
        };
    };
    match translator
        .translate_sentence(sentence, SOURCE_LANGUAGE, language, llm)
        .await
    {
        Some(candidate) => SentenceOutcome::Translated {
            reference: reference.clone(),
            candidate,
        },
        None => SentenceOutcome::Skipped {
            index,
            reason: SkipReason::NoTranslation,
        },
    }
}

/// Translate the first `limit` source sentences and accumulate aligned
/// (reference, candidate) pairs for one (model, language) run.
pub async fn collect_pairs<T: SentenceTranslator + ?Sized>(
    translator: &T,
    llm: &str,
    language: &str,
    source: &[String],
    references: &[String],
    limit: usize,
    progress: Option<&ProgressBar>,
) -> RunAccumulation {
    let mut run = RunAccumulation::default();
    for (index, sentence) in source.iter().take(limit).enumerate() {
        run.attempted += 1;
        let outcome = evaluate_sentence(translator, llm, language, index, sentence, references).await;
        run.record(outcome);
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }
    run
}

/// Score an accumulated run: (BLEU, chrF), both on the 0-100 scale.
///
/// The BLEU fraction gets the fixed 100x multiplier; chrF fails fast when
/// the sequences differ in length.
pub fn score_run(references: &[String], candidates: &[String]) -> Result<(f64, f64)> {
    let bleu = metrics::corpus_bleu(references, candidates) * 100.0;
    let chrf = metrics::corpus_chrf(references, candidates)?;
    Ok((bleu, chrf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::report::RunSummary;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub that answers call i with the i-th scripted response.
    struct ScriptedTranslator {
        responses: Vec<Option<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedTranslator {
        fn new(responses: Vec<Option<String>>) -> Self {
            Self {
                responses,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SentenceTranslator for ScriptedTranslator {
        async fn translate_sentence(
            &self,
            _sentence: &str,
            _source: &str,
            _destination: &str,
            _llm: &str,
        ) -> Option<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses.get(call).cloned().flatten()
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_perfect_run_scores_hundred_and_formats_exactly() {
        let source = texts(&["the cat sat", "a dog ran", "birds fly south"]);
        let references = texts(&["translated-0", "translated-1", "translated-2"]);
        let translator = ScriptedTranslator::new(vec![
            Some("translated-0".to_string()),
            Some("translated-1".to_string()),
            Some("translated-2".to_string()),
        ]);

        let run = collect_pairs(&translator, "gpt-4o", "French", &source, &references, 100, None)
            .await;
        assert_eq!(run.references.len(), 3);
        assert_eq!(run.candidates.len(), 3);
        assert_eq!(run.skip_count(), 0);

        let (bleu, chrf) = score_run(&run.references, &run.candidates).unwrap();
        let summary = RunSummary {
            llm: "gpt-4o".to_string(),
            language: "French".to_string(),
            bleu,
            chrf,
            skipped: run.skip_count(),
            attempted: run.attempted,
        };
        assert_eq!(
            summary.format_line(),
            "gpt-4o: English to French: BLEU Score: 100.00, CHR Score: 100.00"
        );
    }

    #[tokio::test]
    async fn test_failed_sentence_is_skipped_not_paired() {
        let source = texts(&["one", "two", "three"]);
        let references = texts(&["un", "deux", "trois"]);
        let translator = ScriptedTranslator::new(vec![
            Some("un".to_string()),
            None,
            Some("trois".to_string()),
        ]);

        let run = collect_pairs(&translator, "gpt-4o", "French", &source, &references, 100, None)
            .await;
        assert_eq!(run.references, texts(&["un", "trois"]));
        assert_eq!(run.candidates, texts(&["un", "trois"]));
        assert_eq!(run.skipped, vec![(1, SkipReason::NoTranslation)]);
        assert_eq!(run.attempted, 3);

        // Scoring proceeds on the two accumulated pairs only.
        let (bleu, chrf) = score_run(&run.references, &run.candidates).unwrap();
        assert!((bleu - 100.0).abs() < 1e-9);
        assert!((chrf - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_reference_is_skipped() {
        let source = texts(&["one", "two", "three"]);
        let references = texts(&["un"]);
        let translator = ScriptedTranslator::new(vec![
            Some("un".to_string()),
            Some("deux".to_string()),
            Some("trois".to_string()),
        ]);

        let run = collect_pairs(&translator, "gpt-4o", "French", &source, &references, 100, None)
            .await;
        assert_eq!(run.references.len(), 1);
        assert_eq!(
            run.skipped,
            vec![
                (1, SkipReason::MissingReference),
                (2, SkipReason::MissingReference)
            ]
        );
    }

    #[tokio::test]
    async fn test_limit_bounds_the_run() {
        let source = texts(&["one", "two", "three", "four"]);
        let references = texts(&["un", "deux", "trois", "quatre"]);
        let translator = ScriptedTranslator::new(vec![
            Some("un".to_string()),
            Some("deux".to_string()),
        ]);

        let run = collect_pairs(&translator, "gpt-4o", "French", &source, &references, 2, None)
            .await;
        assert_eq!(run.attempted, 2);
        assert_eq!(run.references.len(), 2);
    }

    #[test]
    fn test_default_evaluation_set() {
        assert_eq!(EVALUATION_LLMS.len(), 5);
        assert_eq!(EVALUATION_LANGUAGES, &["French", "Chinese"]);
        assert_eq!(DEFAULT_SENTENCES_PER_RUN, 100);
    }
}
