//! Normalized token sequences.
//!
//! Each token is normalized once into two forms consumed by every rule:
//! the lowercased token, and the same with surrounding ASCII punctuation
//! stripped (so "always," still reads as "always").

use crate::lexicon::is_fused_be;
use crate::tokenize::Tokenizer;

/// Which form of a token to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Lowercased token.
    Raw,
    /// Lowercased token with surrounding ASCII punctuation removed.
    Stripped,
}

impl Form {
    /// Both forms, raw first.
    pub const BOTH: [Form; 2] = [Form::Raw, Form::Stripped];
}

/// A lowercased token and its punctuation-stripped variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    raw: String,
    stripped: String,
}

impl Token {
    /// Normalize a token as produced by a tokenizer.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let raw = text.to_lowercase();
        let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation()).to_string();
        Self { raw, stripped }
    }

    /// The lowercased token.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The lowercased token without surrounding punctuation. May be empty.
    #[must_use]
    pub fn stripped(&self) -> &str {
        &self.stripped
    }

    /// The requested form.
    #[must_use]
    pub fn form(&self, form: Form) -> &str {
        match form {
            Form::Raw => &self.raw,
            Form::Stripped => &self.stripped,
        }
    }

    /// Whether the token is exactly "be".
    #[must_use]
    pub fn is_be(&self) -> bool {
        self.raw == "be"
    }

    /// Whether the token is "be" glued to a punctuation mark ("be-").
    #[must_use]
    pub fn is_fused_be(&self) -> bool {
        is_fused_be(&self.raw)
    }
}

/// An utterance as an ordered sequence of normalized tokens.
///
/// Indices are the unit of positional reasoning: L1 of position `p` is
/// `p - 1`, L2 is `p - 2`, and so on. Offsets that would fall before the
/// start of the utterance yield `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Tokenize and normalize `text`.
    pub fn new<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str) -> Self {
        Self::from_tokens(tokenizer.tokenize(text))
    }

    /// Normalize already tokenized text.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens.into_iter().map(|t| Token::new(t.as_ref())).collect(),
        }
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// All tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the last token.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.tokens.len().checked_sub(1)
    }

    /// Positions of tokens that are exactly "be".
    #[must_use]
    pub fn be_positions(&self) -> Vec<usize> {
        self.positions(Token::is_be)
    }

    /// Positions of "be" fused with punctuation.
    #[must_use]
    pub fn fused_be_positions(&self) -> Vec<usize> {
        self.positions(Token::is_fused_be)
    }

    fn positions(&self, pred: impl Fn(&Token) -> bool) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter_map(|(i, t)| pred(t).then_some(i))
            .collect()
    }

    /// The token `offset` places to the left of `position`.
    #[must_use]
    pub fn left(&self, position: usize, offset: usize) -> Option<&Token> {
        position.checked_sub(offset).and_then(|i| self.tokens.get(i))
    }

    /// The `N` tokens immediately left of `position`, in reading order.
    ///
    /// Returns `None` when fewer than `N` tokens precede the position.
    #[must_use]
    pub fn window<const N: usize>(&self, position: usize, form: Form) -> Option<[&str; N]> {
        let start = position.checked_sub(N)?;
        let slice = self.tokens.get(start..position)?;
        Some(std::array::from_fn(|i| slice[i].form(form)))
    }

    /// Lowercased tokens as strings.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.raw.clone()).collect()
    }
}
