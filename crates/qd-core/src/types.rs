//! Core type definitions for qa-docs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protected placeholder tokens substituted for masked content.
///
/// These markers survive normalization verbatim: they are never lowercased,
/// stemmed or stopword-filtered. The set is shared with the pretrained
/// vectorizer vocabulary and must not change without refitting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    /// Fenced or inline code
    Code,
    /// Markdown link or bare URL
    Url,
    /// `@mention` call-out
    Call,
}

impl Placeholder {
    /// Every protected placeholder
    pub const ALL: [Placeholder; 3] = [Placeholder::Code, Placeholder::Url, Placeholder::Call];

    /// Literal token text
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::Code => "<CODE>",
            Placeholder::Url => "<URL>",
            Placeholder::Call => "<CALL>",
        }
    }

    /// Look up a placeholder by its literal token text
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }

    /// Check whether a token is a protected placeholder
    pub fn is_protected(token: &str) -> bool {
        Self::from_token(token).is_some()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of features the keep/drop classifier expects
pub const FEATURE_COUNT: usize = 3;

/// Per-sentence input to the keep/drop classifier.
///
/// Field order is `(score, sentiment, length)` and is a fixed contract with
/// the pretrained classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Usefulness probability in `[0, 1]`
    pub score: f64,
    /// Compound polarity in `[-1, 1]`
    pub sentiment: f64,
    /// Character count of the stripped sentence
    pub length: f64,
}

impl FeatureVector {
    /// Create a feature vector
    pub fn new(score: f64, sentiment: f64, length: usize) -> Self {
        Self {
            score,
            sentiment,
            length: length as f64,
        }
    }

    /// Features in classifier order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.score, self.sentiment, self.length]
    }
}

/// Keep/drop decision for a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Keep,
    Drop,
}

impl Label {
    pub fn is_keep(&self) -> bool {
        matches!(self, Label::Keep)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Keep => write!(f, "keep"),
            Label::Drop => write!(f, "drop"),
        }
    }
}

/// A sentence after it has gone through the comment pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    /// Sentence as segmented from the comment
    pub raw: String,
    /// Mention-stripped, link-masked text shown in the Notes section
    pub stripped: String,
    /// Classifier-ready token string
    pub normalized: String,
    /// Classifier input
    pub features: FeatureVector,
    /// Classifier output
    pub label: Label,
}

/// blake3 fingerprint of a loaded artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactDigest(pub String);

impl ArtifactDigest {
    /// Fingerprint raw artifact bytes
    pub fn of(bytes: &[u8]) -> Self {
        ArtifactDigest(blake3::hash(bytes).to_hex().to_string())
    }

    /// Short form for log lines
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for ArtifactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_tokens() {
        assert_eq!(Placeholder::Code.as_str(), "<CODE>");
        assert_eq!(Placeholder::from_token("<URL>"), Some(Placeholder::Url));
        assert!(Placeholder::is_protected("<CALL>"));
        assert!(!Placeholder::is_protected("<code>"));
        assert!(!Placeholder::is_protected("URL"));
    }

    #[test]
    fn test_feature_vector_order() {
        let features = FeatureVector::new(0.8, -0.25, 42);
        let array = features.as_array();
        assert_eq!(array.len(), FEATURE_COUNT);
        assert_eq!(array, [0.8, -0.25, 42.0]);
    }

    #[test]
    fn test_label() {
        assert!(Label::Keep.is_keep());
        assert!(!Label::Drop.is_keep());
        assert_eq!(Label::Drop.to_string(), "drop");
    }

    #[test]
    fn test_artifact_digest_stability() {
        let d1 = ArtifactDigest::of(b"vocabulary");
        let d2 = ArtifactDigest::of(b"vocabulary");
        assert_eq!(d1, d2);
        assert_eq!(d1.0.len(), 64);
        assert_eq!(d1.short().len(), 12);
        assert_ne!(d1, ArtifactDigest::of(b"other"));
    }
}
