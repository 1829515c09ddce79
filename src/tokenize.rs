//! Word tokenization.
//!
//! The classifier reasons about token positions ("one word to the left of
//! 'be'"), so it depends on how contractions and punctuation are split. The
//! default [`TreebankTokenizer`] follows Penn Treebank conventions:
//!
//! ```text
//! "They don't be home."   →  They | do | n't | be | home | .
//! "I'm gonna be there"    →  I | 'm | gon | na | be | there
//! "You can't be serious!" →  You | ca | n't | be | serious | !
//! "I was be- best"        →  I | was | be- | best
//! ```
//!
//! Hyphens are never split, so a cut-off "be-" stays one token.

use once_cell::sync::Lazy;
use regex::Regex;

/// Splits an utterance into an ordered sequence of word tokens.
///
/// Implementations must preserve reading order and case; the classifier
/// lowercases tokens itself.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`. Empty or whitespace-only text yields no tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Short name for logs and CLI output.
    fn name(&self) -> &'static str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Splits on whitespace only. For text that is already tokenized.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Penn Treebank style tokenizer with sentence splitting.
///
/// Sentences are split first so that only the sentence-final period is
/// detached; periods inside a sentence (abbreviations, initials) stay on
/// their word.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
    /// Create a new tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        split_sentences(text)
            .into_iter()
            .flat_map(tokenize_sentence)
            .collect()
    }

    fn name(&self) -> &'static str {
        "treebank"
    }
}

// =============================================================================
// Sentence splitting
// =============================================================================

// Lowercase, without the trailing period
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "mt", "ft", "no", "gen",
    "sgt", "rev", "capt", "lt", "col", "gov", "sen", "rep",
];

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '”' | '’')
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// A single period after a known abbreviation or a one-letter initial does
/// not end a sentence, nor does an ellipsis.
fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        if !is_terminal(c) {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut j = i + 1;
        while j < chars.len() && is_terminal(chars[j].1) {
            j += 1;
        }
        let run_len = j - run_start;
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }

        let at_boundary = j >= chars.len() || chars[j].1.is_whitespace();
        let ellipsis = run_len > 1 && chars[run_start..j].iter().all(|(_, c)| *c == '.');
        let abbreviation = c == '.' && run_len == 1 && j == run_start + 1 && {
            let word_end = chars[run_start].0;
            let word_start = text[..word_end]
                .rfind(char::is_whitespace)
                .map_or(0, |ws| ws + 1);
            let word = text[word_start..word_end].to_lowercase();
            let single_initial = {
                let mut w = word.chars();
                matches!((w.next(), w.next()), (Some(l), None) if l.is_alphabetic())
            };
            single_initial || word.contains('.') || ABBREVIATIONS.contains(&word.as_str())
        };

        if at_boundary && !ellipsis && !abbreviation {
            let end = chars.get(j).map_or(text.len(), |(b, _)| *b);
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
        i = j;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

// =============================================================================
// Treebank substitutions (compiled once, lazily)
// =============================================================================

struct Substitution {
    regex: Regex,
    replacement: &'static str,
}

fn sub(pattern: &str, replacement: &'static str) -> Substitution {
    Substitution {
        regex: Regex::new(pattern).unwrap(),
        replacement,
    }
}

fn apply(substitutions: &[Substitution], text: String) -> String {
    substitutions.iter().fold(text, |acc, s| {
        s.regex.replace_all(&acc, s.replacement).into_owned()
    })
}

static STARTING_QUOTES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    vec![
        sub(r"([«“‘„]|`+)", " ${1} "),
        sub(r#"^""#, "``"),
        sub(r"(``)", " ${1} "),
        sub(r#"([ (\[{<])("|'')"#, "${1} `` "),
    ]
});

static PUNCTUATION: Lazy<Vec<Substitution>> = Lazy::new(|| {
    vec![
        sub(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2} ${3} "),
        sub(r"([:,])([^\d])", " ${1} ${2}"),
        sub(r"([:,])$", " ${1} "),
        sub(r"\.{2,}", " ${0} "),
        sub(r"[;@#$%&]", " ${0} "),
        sub(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
        sub(r"[?!]", " ${0} "),
        sub(r"([^'])' ", "${1} ' "),
        sub(r"[*]", " ${0} "),
    ]
});

static BRACKETS_AND_DASHES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    vec![
        sub(r"[\]\[(){}<>]", " ${0} "),
        sub(r"--", " -- "),
    ]
});

static ENDING_QUOTES: Lazy<Vec<Substitution>> = Lazy::new(|| {
    vec![
        sub(r"([»”’])", " ${1} "),
        sub(r"''", " '' "),
        sub(r#"""#, " '' "),
        sub(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        sub(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ]
});

static CONTRACTIONS: Lazy<Vec<Substitution>> = Lazy::new(|| {
    vec![
        sub(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        sub(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        sub(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        sub(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        sub(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        sub(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        sub(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        sub(r"(?i)\b(wan)(na)(\s)", " ${1} ${2}${3}"),
        sub(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        sub(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ]
});

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Detach a quote from a following one-letter word ("'a" → "' a"), except
/// for the clitics m, t, s, d and n which the ending rules handle.
fn split_quoted_letters(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if c != '\'' {
            continue;
        }
        let next = chars.get(i + 1).copied();
        let after = chars.get(i + 2).copied();
        if let Some(letter) = next {
            let single = is_word_char(letter) && !after.is_some_and(is_word_char);
            let clitic = matches!(letter.to_ascii_lowercase(), 'm' | 't' | 's' | 'd' | 'n');
            if single && !clitic {
                out.push(' ');
            }
        }
    }
    out
}

fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, sentence.to_string());
    let text = split_quoted_letters(&text);
    let text = apply(&PUNCTUATION, text);
    let text = apply(&BRACKETS_AND_DASHES, text);
    let text = apply(&ENDING_QUOTES, format!(" {text} "));
    let text = apply(&CONTRACTIONS, text);
    text.split_whitespace().map(str::to_string).collect()
}
