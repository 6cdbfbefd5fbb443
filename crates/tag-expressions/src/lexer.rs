//! Tokenises tag expressions into operators, parentheses, and literals.
//!
//! Complex literals such as `author(alice,bob)` are masked before splitting so
//! their parentheses and commas never reach the parser as grouping syntax.
//! Each distinct complex literal is swapped for a placeholder made of word
//! characters, the masked text is split on whitespace with `(` and `)` forced
//! into their own tokens, and placeholders are swapped back while emitting
//! literal tokens.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static COMPLEX_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+\([\w,]+\)").unwrap_or_else(|_| unreachable!()));

/// Boolean operators recognised by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    Operator(Operator),
    Open,
    Close,
    Literal(String),
}

/// Placeholder bookkeeping for the complex literals of a single input.
#[derive(Debug, Default)]
pub(crate) struct MaskTable {
    marker: String,
    originals: HashMap<String, String>,
    placeholders: HashMap<String, String>,
}

impl MaskTable {
    /// Create an empty table whose placeholders cannot occur in `input`.
    ///
    /// Every placeholder embeds a marker absent from `input`, so any marker
    /// found in masked text was put there by this table.
    fn for_input(input: &str) -> Self {
        let marker = (0_u32..)
            .map(|salt| format!("tagexpr{salt}"))
            .find(|candidate| !input.contains(candidate.as_str()))
            .unwrap_or_default();
        Self {
            marker,
            ..Self::default()
        }
    }

    fn placeholder_for(&mut self, original: &str) -> String {
        if let Some(existing) = self.placeholders.get(original) {
            return existing.clone();
        }
        let placeholder = format!("__{}_{}__", self.marker, self.placeholders.len());
        log::trace!("masking complex literal '{original}' as '{placeholder}'");
        self.placeholders.insert(original.to_string(), placeholder.clone());
        self.originals.insert(placeholder.clone(), original.to_string());
        placeholder
    }

    /// Swap every placeholder in `token` back to its complex literal.
    pub(crate) fn restore(&self, token: &str) -> String {
        if let Some(original) = self.originals.get(token) {
            return original.clone();
        }
        if self.originals.is_empty() || !token.contains(self.marker.as_str()) {
            return token.to_string();
        }
        self.originals
            .iter()
            .fold(token.to_string(), |acc, (placeholder, original)| {
                acc.replace(placeholder.as_str(), original)
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.originals.len()
    }
}

/// Replace each complex literal in `input` with its placeholder.
pub(crate) fn mask_complex_literals(input: &str) -> (String, MaskTable) {
    let mut table = MaskTable::for_input(input);
    let masked = COMPLEX_LITERAL_RE
        .replace_all(input, |caps: &Captures<'_>| {
            let original = caps.get(0).map_or("", |m| m.as_str());
            table.placeholder_for(original)
        })
        .into_owned();
    (masked, table)
}

/// Split `input` into tokens, keeping complex literals intact.
pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    let (masked, table) = mask_complex_literals(input);
    let spaced = masked.replace('(', " ( ").replace(')', " ) ");
    let tokens: Vec<Token> = spaced
        .split_whitespace()
        .map(|word| match word {
            "(" => Token::Open,
            ")" => Token::Close,
            other => Operator::from_keyword(other)
                .map_or_else(|| Token::Literal(table.restore(other)), Token::Operator),
        })
        .collect();
    log::trace!(
        "tokenised '{input}' into {} tokens ({} complex literals)",
        tokens.len(),
        table.len()
    );
    tokens
}
