//! Sentence normalization
//!
//! A sentence is turned into a classifier-ready token string by folding it
//! through [`NormalizeStep::PIPELINE`]. Each step sees the output of the one
//! before it, so the order matters: Markdown links are masked before bare
//! URLs, and camelCase is split before tokens are stemmed.

use super::stemmer::PorterStemmer;
use super::stopwords::StopwordFilter;
use super::tokenizer::{Token, WordTokenizer};
use crate::types::Placeholder;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::trace;

static FENCED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.+?```").expect("valid regex"));

static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`.+?`").expect("valid regex"));

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\S+").expect("valid regex"));

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]\([^)\n]*\)").expect("valid regex"));

static BARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:https?://|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>]+|\((?:[^\s()<>]+|\([^\s()<>]+\))*\))+(?:\((?:[^\s()<>]+|\([^\s()<>]+\))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’])"#,
    )
    .expect("valid regex")
});

static CAMEL_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// One stage of the normalization pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeStep {
    /// ```` ```...``` ```` → `<CODE>`
    MaskFencedCode,
    /// `` `...` `` → `<CODE>`
    MaskInlineCode,
    /// `@name` → `<CALL>`
    MaskMentions,
    /// `[text](url)` → `<URL>`
    MaskMarkdownLinks,
    /// `https://…`, `www.…`, `host.tld/…` → `<URL>`
    MaskBareUrls,
    /// `parseJson` → `parse Json`
    SplitCamelCase,
    /// Tokenize, drop stopwords and non-alphanumeric tokens, stem the rest
    StemTokens,
}

impl NormalizeStep {
    /// The full pipeline, in application order
    pub const PIPELINE: [NormalizeStep; 7] = [
        NormalizeStep::MaskFencedCode,
        NormalizeStep::MaskInlineCode,
        NormalizeStep::MaskMentions,
        NormalizeStep::MaskMarkdownLinks,
        NormalizeStep::MaskBareUrls,
        NormalizeStep::SplitCamelCase,
        NormalizeStep::StemTokens,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NormalizeStep::MaskFencedCode => "mask-fenced-code",
            NormalizeStep::MaskInlineCode => "mask-inline-code",
            NormalizeStep::MaskMentions => "mask-mentions",
            NormalizeStep::MaskMarkdownLinks => "mask-markdown-links",
            NormalizeStep::MaskBareUrls => "mask-bare-urls",
            NormalizeStep::SplitCamelCase => "split-camel-case",
            NormalizeStep::StemTokens => "stem-tokens",
        }
    }
}

/// Deterministic sentence normalizer
pub struct TextNormalizer {
    tokenizer: WordTokenizer,
    stopwords: StopwordFilter,
    stemmer: PorterStemmer,
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("stopwords", &self.stopwords.len())
            .field("stemmer", &"porter")
            .finish()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Create a normalizer with the English stopword list and stemmer
    pub fn new() -> Self {
        Self::with_stopwords(StopwordFilter::english())
    }

    /// Create a normalizer with a custom stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
            stopwords,
            stemmer: PorterStemmer::new(),
        }
    }

    /// Run the whole pipeline over a raw sentence
    pub fn normalize(&self, sentence: &str) -> String {
        NormalizeStep::PIPELINE
            .iter()
            .fold(sentence.to_string(), |text, step| {
                let next = self.apply(*step, &text);
                trace!("{}: {:?}", step.name(), next);
                next
            })
    }

    /// Apply a single step
    pub fn apply(&self, step: NormalizeStep, text: &str) -> String {
        match step {
            NormalizeStep::MaskFencedCode => {
                FENCED_CODE_RE.replace_all(text, Placeholder::Code.as_str()).into_owned()
            }
            NormalizeStep::MaskInlineCode => {
                INLINE_CODE_RE.replace_all(text, Placeholder::Code.as_str()).into_owned()
            }
            NormalizeStep::MaskMentions => {
                MENTION_RE.replace_all(text, Placeholder::Call.as_str()).into_owned()
            }
            NormalizeStep::MaskMarkdownLinks => {
                MARKDOWN_LINK_RE.replace_all(text, Placeholder::Url.as_str()).into_owned()
            }
            NormalizeStep::MaskBareUrls => {
                BARE_URL_RE.replace_all(text, Placeholder::Url.as_str()).into_owned()
            }
            NormalizeStep::SplitCamelCase => CAMEL_CASE_RE.replace_all(text, "$1 $2").into_owned(),
            NormalizeStep::StemTokens => self.stem_tokens(text),
        }
    }

    fn stem_tokens(&self, text: &str) -> String {
        let mut selected: Vec<String> = Vec::new();

        for token in self.tokenizer.tokenize(text) {
            let word = match token {
                Token::Placeholder(p) => {
                    selected.push(p.as_str().to_string());
                    continue;
                }
                Token::Word(w) | Token::Punct(w) => w.to_lowercase(),
            };

            if is_alphanumeric(&word) && !self.stopwords.is_stopword(&word) {
                selected.push(self.stemmer.stem(&word));
            }
        }

        selected.join(" ")
    }
}

fn is_alphanumeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphanumeric)
}

/// Remove `@mention` call-outs and collapse the whitespace they leave behind
pub fn strip_mentions(sentence: &str) -> String {
    collapse_whitespace(&MENTION_RE.replace_all(sentence, ""))
}

/// Text of a sentence as shown in the Notes section: mentions removed and
/// links masked with `<URL>`
pub fn display_text(sentence: &str) -> String {
    let text = strip_mentions(sentence);
    let text = MARKDOWN_LINK_RE.replace_all(&text, Placeholder::Url.as_str());
    let text = BARE_URL_RE.replace_all(&text, Placeholder::Url.as_str());
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}
