//! The left-context classifier.
//!
//! Counts the occurrences of "be" in an utterance that no non-habitual rule
//! eliminates. The count is what a human reviewer has to look at:
//!
//! | Result | Meaning |
//! |--------|---------|
//! | 0 | nothing to review (every "be" is governed, or there is none) |
//! | N ≥ 1 | N occurrences may be habitual and need manual review |
//!
//! Anomalies never fail: an utterance whose literal count is 0, or whose
//! count cannot be matched to any token, is flagged with
//! [`MANUAL_REVIEW_SENTINEL`] instead.

use crate::rules::{Cascade, Verdict};
use crate::token::TokenSequence;
use crate::tokenize::{Tokenizer, TreebankTokenizer};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Count written for rows that need a human look for non-linguistic
/// reasons (missing or inconsistent literal count).
pub const MANUAL_REVIEW_SENTINEL: usize = 1;

/// How the feature count of an utterance was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every located "be" went through the cascade.
    Classified,
    /// The literal count was 0; flagged with the sentinel.
    NoInstancesCounted,
    /// Empty or whitespace-only text; count 0.
    EmptyContent,
    /// Only "be" fused with punctuation was found; count 0.
    FusedOnly,
    /// The literal count is positive but no "be" token was found; flagged
    /// with the sentinel.
    Inconsistent,
}

impl Outcome {
    /// Whether the count is a sentinel rather than a classification.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Outcome::NoInstancesCounted | Outcome::Inconsistent)
    }

    /// Snake-case name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Classified => "classified",
            Outcome::NoInstancesCounted => "no_instances_counted",
            Outcome::EmptyContent => "empty_content",
            Outcome::FusedOnly => "fused_only",
            Outcome::Inconsistent => "inconsistent",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decision for a single "be" token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Token index of the occurrence.
    pub position: usize,
    /// Non-habitual or candidate.
    pub verdict: Verdict,
    /// Name of the deciding rule; `None` when nothing matched.
    pub rule: Option<&'static str>,
}

/// Full result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Lowercased tokens.
    pub tokens: Vec<String>,
    /// One entry per exact "be" token, in order.
    pub occurrences: Vec<Occurrence>,
    /// Positions of "be" fused with punctuation. These never count.
    pub fused: Vec<usize>,
    /// How the count was reached.
    pub outcome: Outcome,
    /// Number of occurrences that need manual review.
    pub feature_count: usize,
}

impl Analysis {
    /// Occurrences flagged as candidates.
    pub fn candidates(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences
            .iter()
            .filter(|o| o.verdict == Verdict::Candidate)
    }
}

/// Left-context classifier for "be".
///
/// Pure and `Sync`: one instance can classify any number of utterances
/// concurrently.
///
/// # Example
///
/// ```rust
/// use habitual_be::Classifier;
///
/// let classifier = Classifier::new();
/// assert_eq!(classifier.classify("you should be studying", 1), 0);
/// assert_eq!(classifier.classify("they be working", 1), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Classifier<T = TreebankTokenizer> {
    tokenizer: T,
    cascade: Cascade,
}

impl Classifier<TreebankTokenizer> {
    /// Classifier with the Treebank tokenizer and the standard cascade.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tokenizer(TreebankTokenizer)
    }
}

impl Default for Classifier<TreebankTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> Classifier<T> {
    /// Classifier with a custom tokenizer and the standard cascade.
    #[must_use]
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            tokenizer,
            cascade: Cascade::standard().clone(),
        }
    }

    /// Replace the rule cascade.
    #[must_use]
    pub fn with_cascade(mut self, cascade: Cascade) -> Self {
        self.cascade = cascade;
        self
    }

    /// The tokenizer in use.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// The rule cascade in use.
    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Number of "be" occurrences in `text` needing manual review.
    ///
    /// `instances_count` is the literal count of "be"/"Be" substrings
    /// computed upstream (see [`count_be_instances`]).
    #[must_use]
    pub fn classify(&self, text: &str, instances_count: usize) -> usize {
        self.analyze(text, instances_count).feature_count
    }

    /// Classify and keep the per-occurrence decisions.
    #[must_use]
    pub fn analyze(&self, text: &str, instances_count: usize) -> Analysis {
        let tokens = TokenSequence::new(&self.tokenizer, text);
        self.analyze_tokens(&tokens, instances_count)
    }

    /// Classify an already tokenized utterance.
    #[must_use]
    pub fn analyze_tokens(&self, tokens: &TokenSequence, instances_count: usize) -> Analysis {
        let occurrences: Vec<Occurrence> = tokens
            .be_positions()
            .into_iter()
            .map(|position| {
                let decision = self.cascade.decide(tokens, position);
                log::debug!(
                    "be@{}: {} ({})",
                    position,
                    decision.verdict,
                    decision.rule.map_or("fallthrough", |r| r.name())
                );
                Occurrence {
                    position,
                    verdict: decision.verdict,
                    rule: decision.rule.map(|r| r.name()),
                }
            })
            .collect();
        let fused = tokens.fused_be_positions();

        let (outcome, feature_count) = if instances_count == 0 {
            (Outcome::NoInstancesCounted, MANUAL_REVIEW_SENTINEL)
        } else if tokens.is_empty() {
            (Outcome::EmptyContent, 0)
        } else if !occurrences.is_empty() {
            let count = occurrences.iter().map(|o| o.verdict.contribution()).sum();
            (Outcome::Classified, count)
        } else if !fused.is_empty() {
            (Outcome::FusedOnly, 0)
        } else {
            (Outcome::Inconsistent, MANUAL_REVIEW_SENTINEL)
        };

        Analysis {
            tokens: tokens.to_strings(),
            occurrences,
            fused,
            outcome,
            feature_count,
        }
    }
}

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::new);

/// Classify with the shared default classifier.
///
/// ```rust
/// assert_eq!(habitual_be::classify("don't be silly", 1), 0);
/// assert_eq!(habitual_be::classify("they don't be home", 1), 1);
/// ```
#[must_use]
pub fn classify(text: &str, instances_count: usize) -> usize {
    DEFAULT_CLASSIFIER.classify(text, instances_count)
}

/// Literal count of "be" and "Be" substrings, as computed upstream.
///
/// This deliberately counts substrings ("best" counts), matching the
/// counts the corpus files carry.
#[must_use]
pub fn count_be_instances(text: &str) -> usize {
    text.matches("be").count() + text.matches("Be").count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Cascade;
    use crate::tokenize::WhitespaceTokenizer;

    #[test]
    fn test_sentinel_on_zero_count() {
        let c = Classifier::new();
        let a = c.analyze("they be working", 0);
        assert_eq!(a.feature_count, MANUAL_REVIEW_SENTINEL);
        assert_eq!(a.outcome, Outcome::NoInstancesCounted);
        assert!(a.outcome.is_sentinel());
    }

    #[test]
    fn test_empty_content() {
        let c = Classifier::new();
        let a = c.analyze("   ", 1);
        assert_eq!(a.feature_count, 0);
        assert_eq!(a.outcome, Outcome::EmptyContent);
    }

    #[test]
    fn test_inconsistent_count() {
        let c = Classifier::new();
        let a = c.analyze("they were working", 1);
        assert_eq!(a.outcome, Outcome::Inconsistent);
        assert_eq!(a.feature_count, MANUAL_REVIEW_SENTINEL);
    }

    #[test]
    fn test_fused_only() {
        let c = Classifier::new();
        let a = c.analyze("they be- best", 2);
        assert_eq!(a.outcome, Outcome::FusedOnly);
        assert_eq!(a.fused, vec![1]);
        assert_eq!(a.feature_count, 0);
    }

    #[test]
    fn test_occurrence_details() {
        let c = Classifier::new();
        let a = c.analyze("should be careful and be working", 2);
        assert_eq!(a.outcome, Outcome::Classified);
        assert_eq!(a.occurrences.len(), 2);
        assert_eq!(a.occurrences[0].verdict, Verdict::NonHabitual);
        assert_eq!(a.occurrences[0].rule, Some("single-trigger-at-l1"));
        assert_eq!(a.occurrences[1].verdict, Verdict::Candidate);
        assert_eq!(a.occurrences[1].rule, None);
        assert_eq!(a.candidates().count(), 1);
        assert_eq!(a.feature_count, 1);
    }

    #[test]
    fn test_custom_tokenizer() {
        let c = Classifier::with_tokenizer(WhitespaceTokenizer);
        // Whitespace tokenization leaves "don't" whole, so no contraction rule fires
        assert_eq!(c.classify("they don't be home", 1), 1);
        assert_eq!(c.classify("you should be home", 1), 0);
    }

    #[test]
    fn test_custom_cascade() {
        let c = Classifier::new().with_cascade(Cascade::builder().build());
        assert_eq!(c.classify("you should be studying", 1), 1);
    }

    #[test]
    fn test_count_be_instances() {
        assert_eq!(count_be_instances("Be quiet, they be working"), 2);
        assert_eq!(count_be_instances("the best"), 1);
        assert_eq!(count_be_instances("nothing here"), 0);
    }
}
