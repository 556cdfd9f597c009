//! Sentence usefulness scoring
//!
//! A pretrained vectorizer plus a probabilistic model map a batch of
//! normalized sentences to P(useful). Class index 1 is "useful".

use super::vectorizer::{SparseRow, TfidfVectorizer};
use crate::error::{QaDocsError, Result};
use serde::{Deserialize, Serialize};

/// Probabilistic model over TF-IDF rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreModel {
    /// Binary logistic regression
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    /// Two-class multinomial naive Bayes
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl ScoreModel {
    /// Feature dimension the model was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            ScoreModel::LogisticRegression { coef, .. } => coef.len(),
            ScoreModel::MultinomialNb {
                feature_log_prob, ..
            } => feature_log_prob[0].len(),
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if let ScoreModel::MultinomialNb {
            feature_log_prob, ..
        } = self
        {
            if feature_log_prob[0].len() != feature_log_prob[1].len() {
                return Err(QaDocsError::ModelShape(format!(
                    "naive Bayes classes have {} and {} features",
                    feature_log_prob[0].len(),
                    feature_log_prob[1].len()
                )));
            }
        }
        Ok(())
    }

    /// Probability of the "useful" class for one row
    pub fn useful_probability(&self, row: &SparseRow) -> f64 {
        match self {
            ScoreModel::LogisticRegression { coef, intercept } => {
                let z = intercept + row.iter().map(|&(idx, w)| coef[idx] * w).sum::<f64>();
                sigmoid(z)
            }
            ScoreModel::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let jll = |class: usize| {
                    class_log_prior[class]
                        + row
                            .iter()
                            .map(|&(idx, w)| feature_log_prob[class][idx] * w)
                            .sum::<f64>()
                };
                let (neg, pos) = (jll(0), jll(1));
                let max = neg.max(pos);
                let log_norm = max + ((neg - max).exp() + (pos - max).exp()).ln();
                (pos - log_norm).exp()
            }
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Maps normalized sentences to usefulness probabilities
#[derive(Debug, Clone)]
pub struct SentenceScorer {
    vectorizer: TfidfVectorizer,
    model: ScoreModel,
}

impl SentenceScorer {
    /// Pair a vectorizer with a score model, checking their dimensions agree
    pub fn new(vectorizer: TfidfVectorizer, model: ScoreModel) -> Result<Self> {
        vectorizer.validate()?;
        model.validate()?;
        if vectorizer.n_features() != model.n_features() {
            return Err(QaDocsError::ModelShape(format!(
                "vectorizer produces {} features but score model expects {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Score a batch; output has the same length and order as the input
    pub fn score_batch(&self, normalized: &[String]) -> Vec<f64> {
        self.vectorizer
            .transform(normalized)
            .iter()
            .map(|row| self.model.useful_probability(row))
            .collect()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vectorizer() -> TfidfVectorizer {
        let vocabulary = HashMap::from([("fix".to_string(), 0), ("thank".to_string(), 1)]);
        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0])
    }

    fn logistic() -> ScoreModel {
        ScoreModel::LogisticRegression {
            coef: vec![3.0, -3.0],
            intercept: 0.0,
        }
    }

    #[test]
    fn test_logistic_scores() {
        let scorer = SentenceScorer::new(vectorizer(), logistic()).unwrap();
        let scores = scorer.score_batch(&[
            "fix".to_string(),
            "thank".to_string(),
            String::new(),
        ]);
        assert_eq!(scores.len(), 3);
        assert!(scores[0] > 0.9);
        assert!(scores[1] < 0.1);
        // Empty input falls back to the intercept
        assert!((scores[2] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scores_in_unit_interval() {
        let scorer = SentenceScorer::new(vectorizer(), logistic()).unwrap();
        for score in scorer.score_batch(&["fix fix fix".to_string(), "thank thank".to_string()]) {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_naive_bayes_scores() {
        let model = ScoreModel::MultinomialNb {
            class_log_prior: [0.5_f64.ln(), 0.5_f64.ln()],
            feature_log_prob: [
                vec![0.2_f64.ln(), 0.8_f64.ln()],
                vec![0.8_f64.ln(), 0.2_f64.ln()],
            ],
        };
        let scorer = SentenceScorer::new(vectorizer(), model).unwrap();
        let scores = scorer.score_batch(&["fix".to_string(), String::new()]);
        assert!(scores[0] > 0.5);
        assert!((scores[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let model = ScoreModel::LogisticRegression {
            coef: vec![1.0],
            intercept: 0.0,
        };
        let err = SentenceScorer::new(vectorizer(), model).unwrap_err();
        assert!(matches!(err, QaDocsError::ModelShape(_)));
    }

    #[test]
    fn test_deserialize_tagged_model() {
        let json = r#"{"kind": "logistic_regression", "coef": [0.5, 0.1], "intercept": -0.2}"#;
        let model: ScoreModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.n_features(), 2);
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }
}
