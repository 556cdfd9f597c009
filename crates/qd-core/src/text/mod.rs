//! Text processing for comment sentences
//!
//! Sentence segmentation, placeholder-aware tokenization, stopword filtering,
//! Porter stemming and the ordered normalization pipeline that feeds the
//! usefulness scorer.

pub mod normalizer;
pub mod segmenter;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{display_text, strip_mentions, NormalizeStep, TextNormalizer};
pub use segmenter::{RuleSegmenter, SentenceSegmenter};
pub use stemmer::PorterStemmer;
pub use stopwords::StopwordFilter;
pub use tokenizer::{Token, WordTokenizer};
