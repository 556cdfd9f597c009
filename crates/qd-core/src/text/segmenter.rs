//! Sentence segmentation
//!
//! Comments are split at sentence-final punctuation followed by whitespace,
//! except after known abbreviations, initials and mid-sentence ellipses.
//! Periods inside a token (`x.com/y`, `3.14`) never end a sentence.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// Characters that may trail sentence-final punctuation
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}', '*', '_'];

/// Abbreviations that do not end a sentence
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "al", "approx", "mr", "mrs", "ms", "dr", "prof", "jr", "sr",
    "st", "fig", "no", "vol", "inc", "ltd", "co", "corp", "resp", "esp", "u.s", "a.k.a",
];

/// Splits a comment into ordered sentences
pub trait SentenceSegmenter: Send + Sync {
    /// Segment text into trimmed, non-empty sentences in original order
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Punctuation-rule segmenter with an abbreviation list
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    abbreviations: HashSet<String>,
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSegmenter {
    /// Create a segmenter with the default English abbreviations
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Add abbreviations (written without the trailing period)
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim_end_matches('.').to_lowercase()),
        );
        self
    }

    /// Decide whether `token` closes a sentence, given the token after it
    fn ends_sentence(&self, token: &str, next: &str) -> bool {
        let core = token.trim_end_matches(CLOSERS);

        if core.ends_with('?') || core.ends_with('!') {
            return true;
        }
        if !core.ends_with('.') {
            return false;
        }

        if core.ends_with("..") {
            // Ellipsis continues the sentence when the next word is lowercase.
            return !next.chars().next().is_some_and(char::is_lowercase);
        }

        let word = core
            .trim_end_matches('.')
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        if word.is_empty() {
            return true;
        }
        if self.abbreviations.contains(&word) {
            return false;
        }
        // Single-letter initials such as "J." in "J. Smith"
        let mut chars = word.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_alphabetic() {
                return false;
            }
        }

        true
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let tokens: Vec<_> = TOKEN_RE.find_iter(text).collect();
        let mut sentences = Vec::new();
        let mut start = match tokens.first() {
            Some(first) => first.start(),
            None => return sentences,
        };

        for pair in tokens.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if self.ends_sentence(current.as_str(), next.as_str()) {
                sentences.push(text[start..current.end()].trim().to_string());
                start = next.start();
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        sentences
    }
}
