//! Comment filtering
//!
//! Each comment is segmented into sentences; every sentence gets a
//! `(score, sentiment, length)` feature vector and the pretrained keep/drop
//! classifier decides which sentences reach the Notes section. The usefulness
//! score is only ever a classifier input, never a cutoff on its own.

use super::escape::escape_html;
use crate::error::{QaDocsError, Result};
use crate::model::PretrainedModels;
use crate::text::{display_text, RuleSegmenter, SentenceSegmenter, TextNormalizer};
use crate::types::{FeatureVector, ScoredSentence};
use tracing::{debug, warn};

/// Heading and separator placed before the Notes list
pub const NOTES_HEADER: &str = "\n\n---\n\n## Notes:\n\n";

/// Turns raw comments into rendered Notes fragments
pub struct CommentFilter<'a, S: SentenceSegmenter = RuleSegmenter> {
    models: &'a PretrainedModels,
    normalizer: TextNormalizer,
    segmenter: S,
}

impl<'a> CommentFilter<'a, RuleSegmenter> {
    /// Create a filter with the default segmenter and normalizer
    pub fn new(models: &'a PretrainedModels) -> Self {
        Self::with_segmenter(models, RuleSegmenter::new())
    }
}

impl<'a, S: SentenceSegmenter> CommentFilter<'a, S> {
    /// Create a filter with a custom segmenter
    pub fn with_segmenter(models: &'a PretrainedModels, segmenter: S) -> Self {
        Self {
            models,
            normalizer: TextNormalizer::new(),
            segmenter,
        }
    }

    /// Run the full pipeline and return every sentence with its decision
    pub fn analyze_comment(&self, comment: &str) -> Result<Vec<ScoredSentence>> {
        let sentences = self.segmenter.segment(comment);
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let normalized: Vec<String> = sentences
            .iter()
            .map(|s| self.normalizer.normalize(s))
            .collect();
        let scores = self.models.scorer().score_batch(&normalized);
        if scores.len() != sentences.len() {
            return Err(QaDocsError::ModelShape(format!(
                "scorer returned {} scores for {} sentences",
                scores.len(),
                sentences.len()
            )));
        }

        sentences
            .into_iter()
            .zip(normalized)
            .zip(scores)
            .map(|((raw, normalized), score)| {
                let stripped = display_text(&raw);
                let sentiment = self.models.sentiment().sentiment_of(&stripped);
                let features = FeatureVector::new(score, sentiment, stripped.chars().count());

                if !features.as_array().iter().all(|v| v.is_finite()) {
                    return Err(QaDocsError::InvalidInput(format!(
                        "non-finite features {:?} for sentence {:?}",
                        features.as_array(),
                        raw
                    )));
                }

                let label = self.models.classifier().predict(&features);
                Ok(ScoredSentence {
                    raw,
                    stripped,
                    normalized,
                    features,
                    label,
                })
            })
            .collect()
    }

    /// Render the kept sentences of one comment as a `- ...` list item, or an
    /// empty string when nothing is kept
    pub fn filter_comment(&self, comment: &str) -> Result<String> {
        let sentences = self.analyze_comment(comment)?;
        Ok(render_kept(&sentences))
    }

    /// Render the Notes section for a list of comments; empty when no
    /// comment keeps a sentence.
    ///
    /// A comment that fails to filter contributes nothing; the others are
    /// still rendered.
    pub fn render_notes(&self, comments: &[String]) -> Result<String> {
        let mut content = String::new();

        for (idx, comment) in comments.iter().enumerate() {
            let fragment = match self.filter_comment(comment) {
                Ok(fragment) => fragment,
                Err(e) => {
                    warn!("Skipping comment {}: {}", idx, e);
                    continue;
                }
            };
            if !fragment.is_empty() {
                content.push_str(&fragment);
                content.push('\n');
            }
        }

        if content.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("{}{}", NOTES_HEADER, content))
        }
    }
}

/// Render already-analyzed sentences the way [`CommentFilter::filter_comment`]
/// does: kept sentences joined, HTML-escaped and prefixed with `- `
pub fn render_kept(sentences: &[ScoredSentence]) -> String {
    let kept: Vec<&str> = sentences
        .iter()
        .filter(|s| s.label.is_keep())
        .map(|s| s.stripped.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    debug!(
        total = sentences.len(),
        kept = kept.len(),
        "Filtered comment sentences"
    );

    let joined = escape_html(&kept.join(" "));
    if joined.is_empty() {
        String::new()
    } else {
        format!("- {}", joined)
    }
}
