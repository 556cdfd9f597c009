//! Configuration management for qa-docs

use crate::error::{QaDocsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pretrained artifact locations
    pub models: ModelsConfig,
    /// Comment pipeline settings
    pub pipeline: PipelineConfig,
    /// Generated page settings
    pub output: OutputConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QaDocsError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Invalid config {}", path.display())))
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Locations of the pretrained artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Directory holding all artifacts
    pub dir: PathBuf,
    /// TF-IDF vectorizer file name
    pub vectorizer: String,
    /// Usefulness score model file name
    pub sentence_scorer: String,
    /// Keep/drop classifier file name
    pub comment_classifier: String,
    /// Sentiment lexicon file name
    pub sentiment_lexicon: String,
}

impl ModelsConfig {
    /// Full path of the vectorizer artifact
    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(&self.vectorizer)
    }

    /// Full path of the usefulness score model
    pub fn sentence_scorer_path(&self) -> PathBuf {
        self.dir.join(&self.sentence_scorer)
    }

    /// Full path of the keep/drop classifier
    pub fn comment_classifier_path(&self) -> PathBuf {
        self.dir.join(&self.comment_classifier)
    }

    /// Full path of the sentiment lexicon
    pub fn sentiment_lexicon_path(&self) -> PathBuf {
        self.dir.join(&self.sentiment_lexicon)
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            vectorizer: "vectorizer.json".to_string(),
            sentence_scorer: "sentence_scorer.json".to_string(),
            comment_classifier: "comment_classifier.json".to_string(),
            sentiment_lexicon: "vader_lexicon.txt".to_string(),
        }
    }
}

/// Comment pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Render a Notes section from comments on question pages
    pub include_notes: bool,
    /// Extra abbreviations the sentence segmenter must not split after
    pub extra_abbreviations: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            include_notes: true,
            extra_abbreviations: Vec::new(),
        }
    }
}

/// Generated page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output root directory
    pub dir: PathBuf,
    /// Subdirectory for question pages
    pub questions_dir: String,
    /// Subdirectory for tag pages
    pub tags_dir: String,
    /// Page file extension
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("docs"),
            questions_dir: "questions".to_string(),
            tags_dir: "tags".to_string(),
            extension: "md".to_string(),
        }
    }
}
