//! CLI argument parsing and structure definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use super::commands;
use crate::lexicon::WordClass;

/// Habitual 'be' classifier for AAL transcripts
#[derive(Parser)]
#[command(name = "habitual-be")]
#[command(
    author,
    version,
    about = "Flag possibly habitual 'be' in African American Language transcripts",
    long_about = r#"
habitual-be - left-context classifier for habitual 'be'

Every "be" in an utterance goes through a cascade of left-context rules.
Occurrences governed by a modal, an infinitival "to", an imperative position
or a negated contraction other than "don't" are eliminated; the rest are
counted as candidates for manual review.

EXAMPLES:
  habitual-be classify "they be working"
  habitual-be classify --explain "should be careful and be working"
  habitual-be annotate -i transcripts.csv -o annotated.csv --progress
  habitual-be lexicon modals
  habitual-be config show
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single utterance
    #[command(visible_alias = "c")]
    Classify(commands::ClassifyArgs),

    /// Annotate a CSV corpus with feature counts
    #[command(visible_alias = "a")]
    Annotate(commands::AnnotateArgs),

    /// Print lexicon entries
    #[command(visible_alias = "lex")]
    Lexicon(commands::LexiconArgs),

    /// Show or create the annotation config
    Config(commands::ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Output format for the classify command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output (default)
    #[default]
    Human,
    /// JSON object with the full analysis
    Json,
    /// Tab-separated values
    Tsv,
}

/// Lexicon selection for the lexicon command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LexiconKind {
    /// Modals and infinitival "to"
    Modals,
    /// Non-modal governing words
    Triggers,
    /// Adverbs and fillers
    Adverbs,
    /// Coordinating conjunctions
    Conjunctions,
    /// Subject pronouns
    Pronouns,
    /// Clause introducers ("if", "whether", ...)
    Introducers,
    /// Imperative punctuation
    Punctuation,
}

impl LexiconKind {
    /// Word class backing this lexicon; `None` for punctuation
    pub fn word_class(self) -> Option<WordClass> {
        match self {
            Self::Modals => Some(WordClass::Modal),
            Self::Triggers => Some(WordClass::OtherTrigger),
            Self::Adverbs => Some(WordClass::Adverb),
            Self::Conjunctions => Some(WordClass::Conjunction),
            Self::Pronouns => Some(WordClass::Pronoun),
            Self::Introducers => Some(WordClass::ClauseIntroducer),
            Self::Punctuation => None,
        }
    }
}
