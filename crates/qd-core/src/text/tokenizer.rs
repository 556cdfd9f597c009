//! Placeholder-aware word tokenization
//!
//! Placeholder spans are cut out first, the text between them is split into
//! words, and the pieces are merged back in their original order. This keeps
//! `<CODE>`, `<URL>` and `<CALL>` atomic without a multi-word-expression pass.

use crate::types::Placeholder;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<CODE>|<URL>|<CALL>").expect("valid regex"));

/// English clitic suffixes split off a word
const CONTRACTIONS: &[&str] = &["'s", "'m", "'d", "'re", "'ve", "'ll"];

/// A single token produced by [`WordTokenizer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Protected placeholder, kept verbatim
    Placeholder(Placeholder),
    /// Word-like token; may still contain inner punctuation (`x.com`, `n't`)
    Word(String),
    /// A run of leading or trailing punctuation
    Punct(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Placeholder(p) => p.as_str(),
            Token::Word(w) | Token::Punct(w) => w,
        }
    }
}

/// Word tokenizer that treats placeholders as indivisible
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize text, keeping placeholders whole
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for m in PLACEHOLDER_RE.find_iter(text) {
            split_words(&text[last..m.start()], &mut tokens);
            if let Some(placeholder) = Placeholder::from_token(m.as_str()) {
                tokens.push(Token::Placeholder(placeholder));
            }
            last = m.end();
        }
        split_words(&text[last..], &mut tokens);

        tokens
    }
}

fn split_words(segment: &str, tokens: &mut Vec<Token>) {
    for chunk in segment.split_whitespace() {
        let start = chunk
            .char_indices()
            .find(|(_, c)| c.is_alphanumeric())
            .map(|(i, _)| i);

        let Some(start) = start else {
            tokens.push(Token::Punct(chunk.to_string()));
            continue;
        };

        let end = chunk
            .char_indices()
            .rfind(|(_, c)| c.is_alphanumeric())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(chunk.len());

        if start > 0 {
            tokens.push(Token::Punct(chunk[..start].to_string()));
        }
        split_contraction(&chunk[start..end], tokens);
        if end < chunk.len() {
            tokens.push(Token::Punct(chunk[end..].to_string()));
        }
    }
}

fn split_contraction(word: &str, tokens: &mut Vec<Token>) {
    let normalized = word.replace('\u{2019}', "'");
    let lower = normalized.to_lowercase();

    if lower.len() > 3 && lower.ends_with("n't") {
        let cut = normalized.len() - 3;
        tokens.push(Token::Word(normalized[..cut].to_string()));
        tokens.push(Token::Word(normalized[cut..].to_string()));
        return;
    }

    for suffix in CONTRACTIONS {
        if lower.len() > suffix.len() && lower.ends_with(suffix) {
            let cut = normalized.len() - suffix.len();
            tokens.push(Token::Word(normalized[..cut].to_string()));
            tokens.push(Token::Word(normalized[cut..].to_string()));
            return;
        }
    }

    tokens.push(Token::Word(normalized));
}
