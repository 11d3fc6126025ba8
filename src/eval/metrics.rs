//! Corpus-level translation quality metrics
//!
//! Both metrics take the reference sequence first and the candidate
//! sequence second, paired by position.
//!
//! BLEU is returned as a 0-1 fraction; the scoring boundary applies the
//! 100x multiplier. chrF is natively on the 0-100 scale.

use std::collections::HashMap;

use crate::core::errors::{Result, TranslationError};

/// Highest word n-gram order for BLEU
const BLEU_MAX_ORDER: usize = 4;

/// Highest character n-gram order for chrF
const CHRF_MAX_ORDER: usize = 6;

/// Recall weight for the chrF F-score
const CHRF_BETA: f64 = 2.0;

/// Corpus-level BLEU over whitespace-tokenized text, as a 0-1 fraction.
///
/// Clipped modified n-gram precisions for orders 1..=4 are accumulated
/// across the corpus, combined by geometric mean and multiplied by the
/// brevity penalty `min(1, e^(1 - r/c))`. Orders with no candidate n-grams
/// anywhere in the corpus are excluded from the mean, so very short
/// sentences can still reach 1.0 on a perfect match. Returns 0.0 for an
/// empty corpus and whenever a counted order has zero matches.
pub fn corpus_bleu(references: &[String], candidates: &[String]) -> f64 {
    let mut matched = [0usize; BLEU_MAX_ORDER];
    let mut total = [0usize; BLEU_MAX_ORDER];
    let mut reference_len = 0usize;
    let mut candidate_len = 0usize;

    for (reference, candidate) in references.iter().zip(candidates) {
        let reference_tokens: Vec<&str> = reference.split_whitespace().collect();
        let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();
        reference_len += reference_tokens.len();
        candidate_len += candidate_tokens.len();

        for n in 1..=BLEU_MAX_ORDER {
            let reference_counts = word_ngram_counts(&reference_tokens, n);
            let candidate_counts = word_ngram_counts(&candidate_tokens, n);
            for (gram, count) in &candidate_counts {
                total[n - 1] += count;
                if let Some(reference_count) = reference_counts.get(gram) {
                    matched[n - 1] += (*count).min(*reference_count);
                }
            }
        }
    }

    if candidate_len == 0 {
        return 0.0;
    }

    let mut log_sum = 0.0;
    let mut orders = 0usize;
    for n in 0..BLEU_MAX_ORDER {
        if total[n] == 0 {
            continue;
        }
        if matched[n] == 0 {
            return 0.0;
        }
        log_sum += (matched[n] as f64 / total[n] as f64).ln();
        orders += 1;
    }
    if orders == 0 {
        return 0.0;
    }

    let precision = (log_sum / orders as f64).exp();
    let brevity = if candidate_len >= reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / candidate_len as f64).exp()
    };

    (precision * brevity).clamp(0.0, 1.0)
}

/// Corpus-level chrF on the 0-100 scale.
///
/// Character n-gram statistics for orders 1..=6 are accumulated across the
/// corpus with whitespace removed; precision and recall are averaged over
/// orders and combined as `(1 + beta^2) * P * R / (beta^2 * P + R)` with
/// beta = 2. Fails fast when the reference and candidate sequences differ
/// in length.
pub fn corpus_chrf(references: &[String], candidates: &[String]) -> Result<f64> {
    if references.len() != candidates.len() {
        return Err(TranslationError::LengthMismatch {
            references: references.len(),
            candidates: candidates.len(),
        });
    }

    let mut matched = [0usize; CHRF_MAX_ORDER];
    let mut candidate_total = [0usize; CHRF_MAX_ORDER];
    let mut reference_total = [0usize; CHRF_MAX_ORDER];

    for (reference, candidate) in references.iter().zip(candidates) {
        let reference_chars: Vec<char> =
            reference.chars().filter(|c| !c.is_whitespace()).collect();
        let candidate_chars: Vec<char> =
            candidate.chars().filter(|c| !c.is_whitespace()).collect();

        for n in 1..=CHRF_MAX_ORDER {
            let reference_counts = char_ngram_counts(&reference_chars, n);
            let candidate_counts = char_ngram_counts(&candidate_chars, n);
            reference_total[n - 1] += reference_counts.values().sum::<usize>();
            for (gram, count) in &candidate_counts {
                candidate_total[n - 1] += count;
                if let Some(reference_count) = reference_counts.get(gram) {
                    matched[n - 1] += (*count).min(*reference_count);
                }
            }
        }
    }

    let mut precision_sum = 0.0;
    let mut recall_sum = 0.0;
    let mut orders = 0usize;
    for n in 0..CHRF_MAX_ORDER {
        if candidate_total[n] == 0 && reference_total[n] == 0 {
            continue;
        }
        orders += 1;
        if candidate_total[n] > 0 {
            precision_sum += matched[n] as f64 / candidate_total[n] as f64;
        }
        if reference_total[n] > 0 {
            recall_sum += matched[n] as f64 / reference_total[n] as f64;
        }
    }
    if orders == 0 {
        return Ok(0.0);
    }

    let precision = precision_sum / orders as f64;
    let recall = recall_sum / orders as f64;
    let beta_sq = CHRF_BETA * CHRF_BETA;
    let denominator = beta_sq * precision + recall;
    if denominator == 0.0 {
        return Ok(0.0);
    }

    let score = (1.0 + beta_sq) * precision * recall / denominator;
    Ok((score * 100.0).clamp(0.0, 100.0))
}

/// Count word n-grams of order `n`, keyed by the space-joined gram.
fn word_ngram_counts(tokens: &[&str], n: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window.join(" ")).or_insert(0) += 1;
    }
    counts
}

/// Count character n-grams of order `n`.
fn char_ngram_counts(chars: &[char], n: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    if n == 0 || chars.len() < n {
        return counts;
    }
    for window in chars.windows(n) {
        *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bleu_perfect_match_is_one() {
        let reference = texts(&["the cat sat on the mat", "a quick brown fox"]);
        let bleu = corpus_bleu(&reference, &reference);
        assert!((bleu - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bleu_perfect_match_of_single_token_sentences() {
        let reference = texts(&["translated-0", "translated-1", "translated-2"]);
        let bleu = corpus_bleu(&reference, &reference);
        assert!((bleu - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bleu_no_overlap_is_zero() {
        let references = texts(&["the cat sat"]);
        let candidates = texts(&["dogs bark loudly"]);
        assert_eq!(corpus_bleu(&references, &candidates), 0.0);
    }

    #[test]
    fn test_bleu_empty_corpus_is_zero() {
        assert_eq!(corpus_bleu(&[], &[]), 0.0);
    }

    #[test]
    fn test_bleu_partial_overlap_is_in_range() {
        let references = texts(&["the cat sat on the mat today"]);
        let candidates = texts(&["the cat sat on a mat today"]);
        let bleu = corpus_bleu(&references, &candidates);
        assert!(bleu > 0.0 && bleu < 1.0, "bleu = {bleu}");
    }

    #[test]
    fn test_bleu_brevity_penalty_lowers_short_candidates() {
        let references = texts(&["the cat sat on the mat"]);
        let full = corpus_bleu(&references, &references);
        let short = corpus_bleu(&references, &texts(&["the cat sat"]));
        assert!(short < full);
    }

    #[test]
    fn test_chrf_perfect_match_is_hundred() {
        let reference = texts(&["translated-0", "translated-1", "translated-2"]);
        let chrf = corpus_chrf(&reference, &reference).unwrap();
        assert!((chrf - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_chrf_is_in_range_for_partial_overlap() {
        let references = texts(&["le chat est assis sur le tapis"]);
        let candidates = texts(&["le chat dort sur le tapis"]);
        let chrf = corpus_chrf(&references, &candidates).unwrap();
        assert!(chrf > 0.0 && chrf < 100.0, "chrf = {chrf}");
    }

    #[test]
    fn test_chrf_length_mismatch_is_fatal() {
        let references = texts(&["a", "b", "c"]);
        let candidates = texts(&["a", "b"]);
        let err = corpus_chrf(&references, &candidates).unwrap_err();
        assert!(matches!(
            err,
            TranslationError::LengthMismatch {
                references: 3,
                candidates: 2
            }
        ));
    }

    #[test]
    fn test_chrf_empty_corpus_is_zero() {
        assert_eq!(corpus_chrf(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_chrf_no_overlap_is_low_but_in_range() {
        let references = texts(&["abcdef"]);
        let candidates = texts(&["uvwxyz"]);
        let chrf = corpus_chrf(&references, &candidates).unwrap();
        assert!((0.0..=100.0).contains(&chrf));
        assert_eq!(chrf, 0.0);
    }
}
