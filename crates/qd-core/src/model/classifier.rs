//! Keep/drop classifier over the `(score, sentiment, length)` feature space

use crate::error::{QaDocsError, Result};
use crate::types::{FeatureVector, Label, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

fn default_threshold() -> f64 {
    0.5
}

/// A node of a binary decision tree in flat-array form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go `left` when `x[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class weights `[drop, keep]`
    Leaf { value: [f64; 2] },
}

/// Binary decision tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must come after their parent, which rules out cycles
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(QaDocsError::ModelShape("decision tree has no nodes".to_string()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(QaDocsError::ModelShape(format!(
                            "tree node {} splits on feature {} but only {} features exist",
                            idx, feature, FEATURE_COUNT
                        )));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(QaDocsError::ModelShape(format!(
                                "tree node {} has invalid child {}",
                                idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.iter().any(|v| *v < 0.0) {
                        return Err(QaDocsError::ModelShape(format!(
                            "tree leaf {} has negative class weight",
                            idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Probability of the keep class
    pub fn keep_probability(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return if total > 0.0 { value[1] / total } else { 0.0 };
                }
            }
        }
    }
}

/// Pretrained binary classifier deciding whether a sentence is kept
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommentClassifier {
    LogisticRegression {
        coef: [f64; FEATURE_COUNT],
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    DecisionTree(DecisionTree),
    /// Averages per-tree keep probabilities
    RandomForest { trees: Vec<DecisionTree> },
}

impl CommentClassifier {
    pub fn validate(&self) -> Result<()> {
        match self {
            CommentClassifier::LogisticRegression { threshold, .. } => {
                if !(0.0..=1.0).contains(threshold) {
                    return Err(QaDocsError::ModelShape(format!(
                        "logistic threshold {} outside [0, 1]",
                        threshold
                    )));
                }
                Ok(())
            }
            CommentClassifier::DecisionTree(tree) => tree.validate(),
            CommentClassifier::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(QaDocsError::ModelShape("random forest has no trees".to_string()));
                }
                trees.iter().try_for_each(DecisionTree::validate)
            }
        }
    }

    /// Probability that the sentence should be kept
    pub fn keep_probability(&self, features: &FeatureVector) -> f64 {
        let x = features.as_array();
        match self {
            CommentClassifier::LogisticRegression {
                coef, intercept, ..
            } => {
                let z = intercept + coef.iter().zip(x.iter()).map(|(c, v)| c * v).sum::<f64>();
                1.0 / (1.0 + (-z).exp())
            }
            CommentClassifier::DecisionTree(tree) => tree.keep_probability(&x),
            CommentClassifier::RandomForest { trees } => {
                trees.iter().map(|t| t.keep_probability(&x)).sum::<f64>() / trees.len() as f64
            }
        }
    }

    /// Keep/drop decision
    pub fn predict(&self, features: &FeatureVector) -> Label {
        let p = self.keep_probability(features);
        let keep = match self {
            CommentClassifier::LogisticRegression { threshold, .. } => p >= *threshold,
            _ => p > 0.5,
        };
        if keep {
            Label::Keep
        } else {
            Label::Drop
        }
    }
}
