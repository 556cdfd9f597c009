//! Pretrained model components
//!
//! The TF-IDF vectorizer and score model produce a usefulness probability per
//! sentence, the sentiment analyzer a compound polarity, and the keep/drop
//! classifier combines both with sentence length. Everything is loaded once
//! through [`PretrainedModels`] and only read afterwards.

pub mod artifacts;
pub mod classifier;
pub mod scorer;
pub mod sentiment;
pub mod vectorizer;

pub use artifacts::{ArtifactBytes, ArtifactDigests, PretrainedModels};
pub use classifier::{CommentClassifier, DecisionTree, TreeNode};
pub use scorer::{ScoreModel, SentenceScorer};
pub use sentiment::SentimentAnalyzer;
pub use vectorizer::{Norm, SparseRow, TfidfVectorizer};
