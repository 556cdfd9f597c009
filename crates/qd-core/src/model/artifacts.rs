//! Pretrained model bundle
//!
//! All artifacts are parsed and cross-checked once at startup. The resulting
//! [`PretrainedModels`] is immutable and passed by reference to every
//! pipeline call.

use super::classifier::CommentClassifier;
use super::scorer::{ScoreModel, SentenceScorer};
use super::sentiment::SentimentAnalyzer;
use super::vectorizer::TfidfVectorizer;
use crate::error::{QaDocsError, Result};
use crate::types::ArtifactDigest;
use tracing::{debug, info};

/// Raw artifact contents, as read from storage
#[derive(Debug, Clone, Default)]
pub struct ArtifactBytes {
    pub vectorizer: Vec<u8>,
    pub sentence_scorer: Vec<u8>,
    pub comment_classifier: Vec<u8>,
    pub sentiment_lexicon: Vec<u8>,
}

/// Fingerprints of the artifacts a bundle was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigests {
    pub vectorizer: ArtifactDigest,
    pub sentence_scorer: ArtifactDigest,
    pub comment_classifier: ArtifactDigest,
    pub sentiment_lexicon: ArtifactDigest,
}

impl ArtifactDigests {
    /// `(artifact name, digest)` pairs in a stable order
    pub fn entries(&self) -> [(&'static str, &ArtifactDigest); 4] {
        [
            ("vectorizer", &self.vectorizer),
            ("sentence_scorer", &self.sentence_scorer),
            ("comment_classifier", &self.comment_classifier),
            ("sentiment_lexicon", &self.sentiment_lexicon),
        ]
    }
}

/// Read-only pretrained state shared by the whole pipeline
#[derive(Debug, Clone)]
pub struct PretrainedModels {
    scorer: SentenceScorer,
    classifier: CommentClassifier,
    sentiment: SentimentAnalyzer,
    digests: Option<ArtifactDigests>,
}

impl PretrainedModels {
    /// Assemble a bundle from already-parsed parts
    pub fn new(
        scorer: SentenceScorer,
        classifier: CommentClassifier,
        sentiment: SentimentAnalyzer,
    ) -> Result<Self> {
        classifier.validate()?;
        Ok(Self {
            scorer,
            classifier,
            sentiment,
            digests: None,
        })
    }

    /// Parse and validate every artifact
    pub fn from_artifacts(bytes: &ArtifactBytes) -> Result<Self> {
        let vectorizer: TfidfVectorizer = serde_json::from_slice(&bytes.vectorizer)
            .map_err(|e| QaDocsError::model_load("vectorizer", e))?;
        let score_model: ScoreModel = serde_json::from_slice(&bytes.sentence_scorer)
            .map_err(|e| QaDocsError::model_load("sentence_scorer", e))?;
        let classifier: CommentClassifier = serde_json::from_slice(&bytes.comment_classifier)
            .map_err(|e| QaDocsError::model_load("comment_classifier", e))?;
        let lexicon = std::str::from_utf8(&bytes.sentiment_lexicon)
            .map_err(|e| QaDocsError::model_load("sentiment_lexicon", e))?;
        let sentiment = SentimentAnalyzer::from_lexicon_str(lexicon)?;

        debug!(
            vocabulary = vectorizer.n_features(),
            lexicon = sentiment.lexicon_size(),
            "Parsed model artifacts"
        );

        let scorer = SentenceScorer::new(vectorizer, score_model)?;
        let mut models = Self::new(scorer, classifier, sentiment)?;

        let digests = ArtifactDigests {
            vectorizer: ArtifactDigest::of(&bytes.vectorizer),
            sentence_scorer: ArtifactDigest::of(&bytes.sentence_scorer),
            comment_classifier: ArtifactDigest::of(&bytes.comment_classifier),
            sentiment_lexicon: ArtifactDigest::of(&bytes.sentiment_lexicon),
        };
        for (name, digest) in digests.entries() {
            info!("Loaded {} ({})", name, digest.short());
        }
        models.digests = Some(digests);

        Ok(models)
    }

    pub fn scorer(&self) -> &SentenceScorer {
        &self.scorer
    }

    pub fn classifier(&self) -> &CommentClassifier {
        &self.classifier
    }

    pub fn sentiment(&self) -> &SentimentAnalyzer {
        &self.sentiment
    }

    /// Artifact fingerprints, when built from raw artifacts
    pub fn digests(&self) -> Option<&ArtifactDigests> {
        self.digests.as_ref()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_artifacts() {
        let models = fixtures::models();
        assert_eq!(models.scorer().vectorizer().n_features(), 6);
        assert_eq!(models.sentiment().lexicon_size(), 3);
        let digests = models.digests().unwrap();
        assert_eq!(digests.vectorizer, ArtifactDigest::of(fixtures::VECTORIZER.as_bytes()));
        assert_eq!(digests.entries().len(), 4);
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() {
        let mut bytes = fixtures::bytes();
        bytes.sentence_scorer = b"{not json".to_vec();
        let err = PretrainedModels::from_artifacts(&bytes).unwrap_err();
        match err {
            QaDocsError::ModelLoad { artifact, .. } => assert_eq!(artifact, "sentence_scorer"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let mut bytes = fixtures::bytes();
        bytes.sentence_scorer =
            br#"{"kind": "logistic_regression", "coef": [1.0], "intercept": 0.0}"#.to_vec();
        let err = PretrainedModels::from_artifacts(&bytes).unwrap_err();
        assert!(matches!(err, QaDocsError::ModelShape(_)));
    }

    #[test]
    fn test_invalid_classifier_is_fatal() {
        let mut bytes = fixtures::bytes();
        bytes.comment_classifier = br#"{"kind": "random_forest", "trees": []}"#.to_vec();
        assert!(PretrainedModels::from_artifacts(&bytes).is_err());
    }

    #[test]
    fn test_models_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PretrainedModels>();
    }
}
