//! The left-context rule cascade.
//!
//! # How an occurrence flows through the cascade
//!
//! ```text
//! "they don't be home"  (be at position 3)
//!
//!   Position      initial? final? after initial conjunction? ── no opinion
//!        │
//!        ▼
//!   Contraction   L1 = n't, L2 = do, do not utterance-initial ── CANDIDATE
//!        │
//!        ▼ (not reached)
//!   Collocation   L1 / [L2 L1] / L2 / [L3 L2 L1] / L3 lexicon checks
//!        │
//!        ▼
//!   fallthrough   ── CANDIDATE
//! ```
//!
//! Each rule returns a [`Verdict`]; the first verdict other than
//! [`Verdict::NoOpinion`] decides the occurrence. Rules only look left of
//! the occurrence and never across utterances.

use crate::lexicon::{
    is_punctuation_trigger, WordClass, CONJUNCTION_ADVERB, PAIR_COLLOCATIONS, TRIPLE_COLLOCATIONS,
};
use crate::token::{Form, TokenSequence};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Outcome of a rule for one occurrence of "be".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Syntax forces a non-habitual reading. Contributes 0.
    NonHabitual,
    /// Possibly habitual; needs manual review. Contributes 1.
    Candidate,
    /// The rule does not apply.
    NoOpinion,
}

impl Verdict {
    /// Contribution to the per-utterance feature count.
    #[must_use]
    pub const fn contribution(self) -> usize {
        match self {
            Verdict::Candidate => 1,
            Verdict::NonHabitual | Verdict::NoOpinion => 0,
        }
    }

    /// Whether the verdict decides the occurrence.
    #[must_use]
    pub const fn is_decisive(self) -> bool {
        !matches!(self, Verdict::NoOpinion)
    }

    fn non_habitual_if(cond: bool) -> Self {
        if cond {
            Verdict::NonHabitual
        } else {
            Verdict::NoOpinion
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::NonHabitual => "non-habitual",
            Verdict::Candidate => "candidate",
            Verdict::NoOpinion => "no-opinion",
        })
    }
}

/// Rules about where the occurrence sits in the utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionRule {
    /// First token of the utterance.
    UtteranceInitial,
    /// Last token of the utterance.
    UtteranceFinal,
    /// Second token, after a coordinating conjunction ("and be careful").
    AfterInitialConjunction,
    /// Third token, after conjunction + adverb ("and always be careful").
    AfterInitialConjunctionAdverb,
}

impl PositionRule {
    fn evaluate(self, tokens: &TokenSequence, position: usize) -> Verdict {
        let first = |class: WordClass| tokens.get(0).is_some_and(|t| class.contains(t.raw()));
        Verdict::non_habitual_if(match self {
            PositionRule::UtteranceInitial => position == 0,
            PositionRule::UtteranceFinal => tokens.last_index() == Some(position),
            PositionRule::AfterInitialConjunction => position == 1 && first(WordClass::Conjunction),
            PositionRule::AfterInitialConjunctionAdverb => {
                position == 2
                    && tokens
                        .window::<2>(position, Form::Raw)
                        .is_some_and(|w| CONJUNCTION_ADVERB.contains(w))
            }
        })
    }

    const fn name(self) -> &'static str {
        match self {
            PositionRule::UtteranceInitial => "utterance-initial",
            PositionRule::UtteranceFinal => "utterance-final",
            PositionRule::AfterInitialConjunction => "after-initial-conjunction",
            PositionRule::AfterInitialConjunctionAdverb => "after-initial-conjunction-adverb",
        }
    }
}

/// Rules about split negative contractions ("do" + "n't").
///
/// Habitual 'be' can be negated with "don't" and nothing else. A "don't"
/// that opens the utterance is a negated imperative instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractionRule {
    /// L1 is "n't": "they don't be", "won't be".
    NegationAtL1,
    /// L2 is "n't": "they don't never be".
    NegationAtL2,
}

impl ContractionRule {
    fn evaluate(self, tokens: &TokenSequence, position: usize) -> Verdict {
        let offset = match self {
            ContractionRule::NegationAtL1 => 1,
            ContractionRule::NegationAtL2 => 2,
        };
        if !tokens.left(position, offset).is_some_and(|t| t.raw() == "n't") {
            return Verdict::NoOpinion;
        }
        let do_offset = offset + 1;
        match tokens.left(position, do_offset) {
            Some(t) if t.raw() == "do" => {
                if position == do_offset {
                    // "don't be silly"
                    Verdict::NonHabitual
                } else {
                    Verdict::Candidate
                }
            }
            _ => Verdict::NonHabitual,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            ContractionRule::NegationAtL1 => "negation-at-l1",
            ContractionRule::NegationAtL2 => "negation-at-l2",
        }
    }
}

/// Lexicon checks over the one to three tokens left of the occurrence.
///
/// Every check accepts either the raw tokens or their punctuation-stripped
/// forms, so a trailing comma on the preceding word does not hide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollocationRule {
    /// L1 is a modal, other trigger or adverb.
    SingleTriggerAtL1,
    /// L1 is `,` `.` `!` or `?` (imperative).
    PunctuationAtL1,
    /// `[L2, L1]` is a governing pair.
    PairWindow,
    /// L2 is a modal or clause introducer.
    OffsetTriggerAtL2,
    /// `[L3, L2, L1]` is a governing triple.
    TripleWindow,
    /// L3 is a modal or clause introducer.
    OffsetTriggerAtL3,
}

impl CollocationRule {
    fn evaluate(self, tokens: &TokenSequence, position: usize) -> Verdict {
        let at = |offset: usize, class: WordClass| {
            tokens
                .left(position, offset)
                .is_some_and(|t| Form::BOTH.iter().any(|f| class.contains(t.form(*f))))
        };
        Verdict::non_habitual_if(match self {
            CollocationRule::SingleTriggerAtL1 => at(1, WordClass::SingleTrigger),
            CollocationRule::PunctuationAtL1 => tokens
                .left(position, 1)
                .is_some_and(|t| is_punctuation_trigger(t.raw())),
            CollocationRule::PairWindow => Form::BOTH.iter().any(|f| {
                tokens
                    .window::<2>(position, *f)
                    .is_some_and(|w| PAIR_COLLOCATIONS.contains(w))
            }),
            CollocationRule::OffsetTriggerAtL2 => at(2, WordClass::OffsetTrigger),
            CollocationRule::TripleWindow => Form::BOTH.iter().any(|f| {
                tokens
                    .window::<3>(position, *f)
                    .is_some_and(|w| TRIPLE_COLLOCATIONS.contains(w))
            }),
            CollocationRule::OffsetTriggerAtL3 => at(3, WordClass::OffsetTrigger),
        })
    }

    const fn name(self) -> &'static str {
        match self {
            CollocationRule::SingleTriggerAtL1 => "single-trigger-at-l1",
            CollocationRule::PunctuationAtL1 => "punctuation-at-l1",
            CollocationRule::PairWindow => "pair-window",
            CollocationRule::OffsetTriggerAtL2 => "offset-trigger-at-l2",
            CollocationRule::TripleWindow => "triple-window",
            CollocationRule::OffsetTriggerAtL3 => "offset-trigger-at-l3",
        }
    }
}

/// One step of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Position in the utterance.
    Position(PositionRule),
    /// Split negative contractions.
    Contraction(ContractionRule),
    /// Lexicon and collocation lookups.
    Collocation(CollocationRule),
}

impl Rule {
    /// Evaluate the rule for the "be" at `position`.
    #[must_use]
    pub fn evaluate(&self, tokens: &TokenSequence, position: usize) -> Verdict {
        match *self {
            Rule::Position(r) => r.evaluate(tokens, position),
            Rule::Contraction(r) => r.evaluate(tokens, position),
            Rule::Collocation(r) => r.evaluate(tokens, position),
        }
    }

    /// Stable kebab-case name, used in explanations.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match *self {
            Rule::Position(r) => r.name(),
            Rule::Contraction(r) => r.name(),
            Rule::Collocation(r) => r.name(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The decision for one occurrence and the rule that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Final verdict: never [`Verdict::NoOpinion`].
    pub verdict: Verdict,
    /// Deciding rule; `None` when no rule applied and the occurrence fell
    /// through as a candidate.
    pub rule: Option<Rule>,
}

/// An ordered list of rules; first decisive verdict wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    rules: Vec<Rule>,
}

/// Builder for [`Cascade`].
#[derive(Debug, Default)]
pub struct CascadeBuilder {
    rules: Vec<Rule>,
}

impl CascadeBuilder {
    /// Append a rule (order matters: earlier = higher priority).
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Build the cascade.
    #[must_use]
    pub fn build(self) -> Cascade {
        Cascade { rules: self.rules }
    }
}

/// The standard cascade, in evaluation order.
pub const STANDARD_RULES: [Rule; 12] = [
    Rule::Position(PositionRule::UtteranceInitial),
    Rule::Position(PositionRule::UtteranceFinal),
    Rule::Position(PositionRule::AfterInitialConjunction),
    Rule::Position(PositionRule::AfterInitialConjunctionAdverb),
    Rule::Contraction(ContractionRule::NegationAtL1),
    Rule::Contraction(ContractionRule::NegationAtL2),
    Rule::Collocation(CollocationRule::SingleTriggerAtL1),
    Rule::Collocation(CollocationRule::PunctuationAtL1),
    Rule::Collocation(CollocationRule::PairWindow),
    Rule::Collocation(CollocationRule::OffsetTriggerAtL2),
    Rule::Collocation(CollocationRule::TripleWindow),
    Rule::Collocation(CollocationRule::OffsetTriggerAtL3),
];

static STANDARD: Lazy<Cascade> = Lazy::new(|| Cascade::builder().rules(STANDARD_RULES).build());

impl Cascade {
    /// Start an empty cascade.
    #[must_use]
    pub fn builder() -> CascadeBuilder {
        CascadeBuilder::default()
    }

    /// The shared standard cascade.
    #[must_use]
    pub fn standard() -> &'static Cascade {
        &STANDARD
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Decide the "be" at `position`.
    #[must_use]
    pub fn decide(&self, tokens: &TokenSequence, position: usize) -> Decision {
        self.rules
            .iter()
            .find_map(|rule| {
                let verdict = rule.evaluate(tokens, position);
                verdict.is_decisive().then_some(Decision {
                    verdict,
                    rule: Some(*rule),
                })
            })
            .unwrap_or(Decision {
                verdict: Verdict::Candidate,
                rule: None,
            })
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Cascade::standard().clone()
    }
}
