//! Fixed-vocabulary TF-IDF vectorizer
//!
//! Input documents are normalized token strings (space separated). Terms not
//! in the fitted vocabulary contribute nothing.

use crate::error::{QaDocsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse feature row: `(column, weight)` pairs sorted by column
pub type SparseRow = Vec<(usize, f64)>;

/// Row normalization applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Pretrained TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term → column index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    /// Use `1 + ln(tf)` instead of raw counts
    #[serde(default)]
    sublinear_tf: bool,
    /// Inclusive token n-gram range
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    /// Build a vectorizer from fitted parameters
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            norm: default_norm(),
            sublinear_tf: false,
            ngram_range: default_ngram_range(),
        }
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Check internal consistency of the fitted parameters
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(QaDocsError::ModelShape(format!(
                "vectorizer has {} vocabulary terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, &idx)| idx >= self.idf.len()) {
            return Err(QaDocsError::ModelShape(format!(
                "vocabulary term '{}' maps to column {} outside {} columns",
                term,
                idx,
                self.idf.len()
            )));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(QaDocsError::ModelShape(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }
        Ok(())
    }

    /// Vectorize a batch of normalized documents
    pub fn transform(&self, documents: &[String]) -> Vec<SparseRow> {
        documents.iter().map(|doc| self.transform_one(doc)).collect()
    }

    fn transform_one(&self, document: &str) -> SparseRow {
        let tokens: Vec<&str> = document.split_whitespace().collect();
        let mut counts: HashMap<usize, f64> = HashMap::new();

        let (min_n, max_n) = self.ngram_range;
        for n in min_n.max(1)..=max_n {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&idx) = self.vocabulary.get(&term) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();
        row.sort_by_key(|(idx, _)| *idx);

        let norm = match self.norm {
            Some(Norm::L2) => row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }

        row
    }
}
