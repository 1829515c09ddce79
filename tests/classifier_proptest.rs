//! Property-based tests for classifier invariants.
//!
//! Utterances are drawn from a small vocabulary dense in the words the
//! rules look at, so most generated inputs exercise several rules.

use habitual_be::{
    Classifier, Outcome, TokenSequence, TreebankTokenizer, Verdict, WhitespaceTokenizer,
    MANUAL_REVIEW_SENTINEL,
};
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "be", "be", "be", "Be", "be-", "they", "you", "she", "should", "could", "to", "don't", "do",
    "n't", "won't", "always", "never", "and", "but", "if", "let", "gonna", "home", "working",
    "quiet", "the", "best", ",", ".", "!", "?",
];

fn utterance() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 0..14).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn zero_count_always_flags(text in utterance()) {
        prop_assert_eq!(Classifier::new().classify(&text, 0), MANUAL_REVIEW_SENTINEL);
    }

    #[test]
    fn count_bounded_by_located_occurrences(text in utterance(), count in 1usize..6) {
        let analysis = Classifier::new().analyze(&text, count);
        if !analysis.occurrences.is_empty() {
            prop_assert!(analysis.feature_count <= analysis.occurrences.len());
            prop_assert_eq!(analysis.feature_count, analysis.candidates().count());
        }
    }

    #[test]
    fn classification_is_idempotent(text in utterance(), count in 0usize..6) {
        let classifier = Classifier::new();
        let first = classifier.analyze(&text, count);
        let second = classifier.analyze(&text, count);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fused_tokens_are_never_occurrences(text in utterance(), count in 1usize..6) {
        let analysis = Classifier::new().analyze(&text, count);
        for occ in &analysis.occurrences {
            prop_assert!(!analysis.fused.contains(&occ.position));
            prop_assert_eq!(analysis.tokens[occ.position].as_str(), "be");
        }
    }

    #[test]
    fn verdicts_are_decisive(text in utterance()) {
        let analysis = Classifier::new().analyze(&text, 1);
        for occ in &analysis.occurrences {
            prop_assert_ne!(occ.verdict, Verdict::NoOpinion);
        }
    }

    #[test]
    fn sentinel_only_for_count_anomalies(text in utterance(), count in 0usize..6) {
        let analysis = Classifier::new().analyze(&text, count);
        match analysis.outcome {
            Outcome::NoInstancesCounted => prop_assert_eq!(count, 0),
            Outcome::Inconsistent => {
                prop_assert!(analysis.occurrences.is_empty());
                prop_assert!(analysis.fused.is_empty());
            }
            Outcome::EmptyContent => prop_assert!(analysis.tokens.is_empty()),
            Outcome::FusedOnly | Outcome::Classified => {}
        }
    }

    #[test]
    fn tokenizer_output_has_no_whitespace(text in utterance()) {
        let tokens = TokenSequence::new(&TreebankTokenizer, &text);
        for token in tokens.tokens() {
            prop_assert!(!token.raw().is_empty());
            prop_assert!(!token.raw().contains(char::is_whitespace));
        }
    }

    #[test]
    fn whitespace_tokenizer_preserves_words(words in prop::collection::vec("[a-z]{1,6}", 0..10)) {
        let text = words.join(" ");
        let seq = TokenSequence::new(&WhitespaceTokenizer, &text);
        prop_assert_eq!(seq.to_strings(), words);
    }
}
