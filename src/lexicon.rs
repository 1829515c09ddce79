//! Static lexicons for left-context classification.
//!
//! Every entry is lowercase; tokens are lowercased before lookup.
//!
//! Collocation windows are defined as cross products of word classes
//! (e.g. modal x pronoun) plus a handful of fixed idiomatic pairs. Membership
//! is checked coordinate by coordinate, so the products are never
//! materialized: `SingleTrigger x Adverb x Adverb` alone would be several
//! hundred thousand tuples.
//!
//! ```text
//!   2-token windows [L2, L1]          3-token windows [L3, L2, L1]
//!   ─────────────────────────         ─────────────────────────────
//!   SingleTrigger x Adverb            Modal x Pronoun x Adverb
//!   Modal x Pronoun                   SingleTrigger x Adverb x Adverb
//!   fixed pairs (gon na, wo n't ...)
//! ```

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

// Modals (and infinitival "to"/"ter"): a following 'be' is always governed.
const MODALS: &[&str] = &[
    "can", "can't", "cannot", "could", "couldn't", "may", "might", "must", "mustn't", "should",
    "shouldn't", "ought", "hafta", "oughta", "will", "won't", "would", "wouldn't", "shall", "'ll",
    "'d", "ll", "d", "twill", "wouldst", "would'st", "shalt", "wilt", "twould", "mayst",
    "wouldnt", "neednt", "mus", "wud", "shouldst", "to", "ter",
];

// Other words that only ever precede a non-habitual 'be'
const OTHER_TRIGGERS: &[&str] = &[
    "had", "tryna", "gonna", "going", "sposta", "supposed", "finna", "gotta", "wanna", "lemme",
    "to", "need", "needn't", "rather", "i'm'a", "let's", "lets", "liketa", "better", "got",
    "want", "please", "na", "ta", "than", "if", "let", "whether", "letting", "uh", "though",
    "them", "us", "me", "her", "him", "best", "ud", "blessed", "praised", "glory", "praise",
    "ull", "'m", "hadda", "why",
];

// Adverbs (mostly of frequency) and fillers that can sit between a
// governing word and 'be' without breaking the government.
const ADVERBS: &[&str] = &[
    "again", "all", "almost", "also", "always", "actually", "annually", "constantly", "daily",
    "eventually", "even", "ever", "frequently", "generally", "hourly", "infrequently", "just",
    "later", "like", "monthly", "never", "next", "nightly", "normally", "not", "now",
    "occasionally", "often", "only", "periodically", "possibly", "probably", "quarterly",
    "rarely", "really", "regularly", "seldomly", "sometimes", "sometime", "soon", "still", "then",
    "today", "tonight", "very", "weekly", "well", "yearly", "yesterday", "yet", "that",
];

const CONJUNCTIONS: &[&str] = &["and", "but", "so", "for", "yet", "or", "nor"];

// Only ever combined with a modal: PRONOUN + 'be' on its own is exactly the
// habitual pattern.
const PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they", "thou"];

// Govern 'be' from two or three tokens away regardless of what intervenes.
const CLAUSE_INTRODUCERS: &[&str] = &["if", "whether", "let", "letting"];

const FIXED_PAIRS: &[[&str; 2]] = &[
    ["gon", "na"],
    ["got", "ta"],
    ["had", "better"],
    ["'m", "a"],
    ["wan", "na"],
    ["can", "n't"],
    ["can", "not"],
    ["could", "n't"],
    ["must", "n't"],
    ["should", "n't"],
    ["wo", "n't"],
    ["would", "n't"],
    ["'", "a"],
    ["let", "'s"],
    ["i", "'m"],
];

/// Punctuation that marks an imperative 'be' when it is the L1 token.
pub const PUNCTUATION_TRIGGERS: &[char] = &[',', '.', '!', '?'];

static MODAL_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| MODALS.iter().copied().collect());
static OTHER_TRIGGER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| OTHER_TRIGGERS.iter().copied().collect());
static ADVERB_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| ADVERBS.iter().copied().collect());
static SINGLE_TRIGGER_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    MODALS
        .iter()
        .chain(OTHER_TRIGGERS)
        .chain(ADVERBS)
        .copied()
        .collect()
});
static CONJUNCTION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CONJUNCTIONS.iter().copied().collect());
static PRONOUN_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| PRONOUNS.iter().copied().collect());
static CLAUSE_INTRODUCER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CLAUSE_INTRODUCERS.iter().copied().collect());
static OFFSET_TRIGGER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| MODALS.iter().chain(CLAUSE_INTRODUCERS).copied().collect());

/// A closed class of words used by the classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    /// Modals plus infinitival "to"/"ter".
    Modal,
    /// Non-modal words that govern a following 'be'.
    OtherTrigger,
    /// Adverbs and fillers that may intervene before 'be'.
    Adverb,
    /// `Modal ∪ OtherTrigger ∪ Adverb`: anything that governs 'be' at L1.
    SingleTrigger,
    /// Coordinating conjunctions.
    Conjunction,
    /// Subject pronouns (inverted after a modal in questions).
    Pronoun,
    /// "if", "whether", "let", "letting".
    ClauseIntroducer,
    /// `Modal ∪ ClauseIntroducer`: governs 'be' from L2 or L3.
    OffsetTrigger,
}

impl WordClass {
    /// All word classes, in display order.
    pub const ALL: [WordClass; 8] = [
        WordClass::Modal,
        WordClass::OtherTrigger,
        WordClass::Adverb,
        WordClass::SingleTrigger,
        WordClass::Conjunction,
        WordClass::Pronoun,
        WordClass::ClauseIntroducer,
        WordClass::OffsetTrigger,
    ];

    fn set(self) -> &'static HashSet<&'static str> {
        match self {
            WordClass::Modal => &*MODAL_SET,
            WordClass::OtherTrigger => &*OTHER_TRIGGER_SET,
            WordClass::Adverb => &*ADVERB_SET,
            WordClass::SingleTrigger => &*SINGLE_TRIGGER_SET,
            WordClass::Conjunction => &*CONJUNCTION_SET,
            WordClass::Pronoun => &*PRONOUN_SET,
            WordClass::ClauseIntroducer => &*CLAUSE_INTRODUCER_SET,
            WordClass::OffsetTrigger => &*OFFSET_TRIGGER_SET,
        }
    }

    /// Whether `word` (already lowercase) belongs to this class.
    #[must_use]
    pub fn contains(self, word: &str) -> bool {
        self.set().contains(word)
    }

    /// Sorted, deduplicated entries of this class.
    #[must_use]
    pub fn entries(self) -> Vec<&'static str> {
        let mut entries: Vec<_> = self.set().iter().copied().collect();
        entries.sort_unstable();
        entries
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(self) -> usize {
        self.set().len()
    }

    /// Whether the class has no entries.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.set().is_empty()
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WordClass::Modal => "modal",
            WordClass::OtherTrigger => "other-trigger",
            WordClass::Adverb => "adverb",
            WordClass::SingleTrigger => "single-trigger",
            WordClass::Conjunction => "conjunction",
            WordClass::Pronoun => "pronoun",
            WordClass::ClauseIntroducer => "clause-introducer",
            WordClass::OffsetTrigger => "offset-trigger",
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of N-token left-context windows.
///
/// The set is the union of some word-class cross products and some fixed
/// token sequences. Windows are given in reading order, so for a 2-token
/// window the L2 token comes first.
#[derive(Debug, Clone, Copy)]
pub struct CollocationSet<const N: usize> {
    products: &'static [[WordClass; N]],
    fixed: &'static [[&'static str; N]],
}

impl<const N: usize> CollocationSet<N> {
    /// Whether the window belongs to the set.
    #[must_use]
    pub fn contains(&self, window: [&str; N]) -> bool {
        self.products
            .iter()
            .any(|classes| classes.iter().zip(window).all(|(class, w)| class.contains(w)))
            || self.fixed.iter().any(|fixed| *fixed == window)
    }

    /// The cross products making up the set.
    #[must_use]
    pub fn products(&self) -> &'static [[WordClass; N]] {
        self.products
    }

    /// The fixed windows making up the set.
    #[must_use]
    pub fn fixed(&self) -> &'static [[&'static str; N]] {
        self.fixed
    }
}

/// `[L2, L1]` windows that govern 'be'.
pub static PAIR_COLLOCATIONS: CollocationSet<2> = CollocationSet {
    products: &[
        [WordClass::SingleTrigger, WordClass::Adverb],
        [WordClass::Modal, WordClass::Pronoun],
    ],
    fixed: FIXED_PAIRS,
};

/// `[L3, L2, L1]` windows that govern 'be'.
pub static TRIPLE_COLLOCATIONS: CollocationSet<3> = CollocationSet {
    products: &[
        [WordClass::Modal, WordClass::Pronoun, WordClass::Adverb],
        [WordClass::SingleTrigger, WordClass::Adverb, WordClass::Adverb],
    ],
    fixed: &[],
};

/// Utterance-initial `[conjunction, adverb]` prefixes ("and always be ...").
pub static CONJUNCTION_ADVERB: CollocationSet<2> = CollocationSet {
    products: &[[WordClass::Conjunction, WordClass::Adverb]],
    fixed: &[],
};

/// Whether the token is a single punctuation trigger character.
#[must_use]
pub fn is_punctuation_trigger(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATION_TRIGGERS.contains(&c))
}

/// Whether the token is "be" fused with one punctuation character
/// ("be-", "-be", "be,", ".be"). These are almost always cut-off words.
#[must_use]
pub fn is_fused_be(token: &str) -> bool {
    let bytes = token.as_bytes();
    match bytes {
        [b'b', b'e', p] => p.is_ascii_punctuation(),
        [p, b'b', b'e'] => p.is_ascii_punctuation(),
        _ => false,
    }
}
