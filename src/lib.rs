//! # habitual-be
//!
//! Left-context classification of "be" in African American Language
//! transcripts.
//!
//! Habitual 'be' ("they be working") marks a recurring state or action.
//! Most other uses of the word are syntactically governed by what precedes
//! it: a modal ("should be"), an infinitival "to", an imperative position,
//! a negated contraction other than "don't". This crate eliminates those
//! uses with a cascade of left-context rules and counts what remains, the
//! occurrences a human annotator still has to review.
//!
//! - **Tokenizer**: Penn Treebank conventions ("don't" → "do" "n't")
//! - **Rules**: position, contraction and collocation checks over L1..L3
//! - **Corpus**: batch annotation of CSV transcripts, in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use habitual_be::{Classifier, Outcome};
//!
//! let classifier = Classifier::new();
//!
//! // Governed by a modal: nothing to review
//! assert_eq!(classifier.classify("you should be studying", 1), 0);
//!
//! // Bare 'be' after a subject: a habitual candidate
//! let analysis = classifier.analyze("they be working", 1);
//! assert_eq!(analysis.feature_count, 1);
//! assert_eq!(analysis.outcome, Outcome::Classified);
//! ```
//!
//! ## Feature counts
//!
//! | Count | Meaning |
//! |-------|---------|
//! | 0 | every "be" is governed, or none was found |
//! | N | N occurrences may be habitual |
//! | 1 (sentinel) | literal count is 0 or matches no token |
//!
//! ## Batch annotation
//!
//! ```rust,no_run
//! use habitual_be::{AnnotateConfig, Classifier, Corpus};
//! use std::path::Path;
//!
//! # fn main() -> habitual_be::Result<()> {
//! let config = AnnotateConfig::default();
//! let mut corpus = Corpus::read_csv(Path::new("transcripts.csv"), &config)?;
//! let summary = corpus.annotate(&Classifier::new(), config.parallel);
//! corpus.write_csv(Path::new("annotated.csv"), &config)?;
//! println!("{} rows flagged", summary.flagged_rows);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `habitual-be` binary and its [`cli`] module

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod lexicon;
pub mod rules;
pub mod token;
pub mod tokenize;

#[cfg(feature = "cli")]
#[allow(missing_docs)]
pub mod cli;

pub use classifier::{
    classify, count_be_instances, Analysis, Classifier, Occurrence, Outcome,
    MANUAL_REVIEW_SENTINEL,
};
pub use config::AnnotateConfig;
pub use corpus::{AnnotationSummary, Corpus, RowDefect, UtteranceRow};
pub use error::{Error, Result};
pub use lexicon::WordClass;
pub use rules::{Cascade, Decision, Rule, Verdict};
pub use token::{Token, TokenSequence};
pub use tokenize::{Tokenizer, TreebankTokenizer, WhitespaceTokenizer};
