//! File system access to pretrained model artifacts

use qd_core::config::ModelsConfig;
use qd_core::error::{QaDocsError, Result};
use qd_core::model::{ArtifactBytes, PretrainedModels};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads the four artifact files named by a [`ModelsConfig`]
pub struct ModelStore {
    config: ModelsConfig,
}

impl ModelStore {
    pub fn new(config: ModelsConfig) -> Self {
        Self { config }
    }

    /// Same file names, different directory
    pub fn with_dir(mut config: ModelsConfig, dir: impl Into<PathBuf>) -> Self {
        config.dir = dir.into();
        Self { config }
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Artifact names paired with their resolved paths
    pub fn artifact_paths(&self) -> [(&'static str, PathBuf); 4] {
        [
            ("vectorizer", self.config.vectorizer_path()),
            ("sentence_scorer", self.config.sentence_scorer_path()),
            ("comment_classifier", self.config.comment_classifier_path()),
            ("sentiment_lexicon", self.config.sentiment_lexicon_path()),
        ]
    }

    /// Read every artifact file; a missing or unreadable file is a load error
    pub fn read_bytes(&self) -> Result<ArtifactBytes> {
        Ok(ArtifactBytes {
            vectorizer: read_artifact("vectorizer", &self.config.vectorizer_path())?,
            sentence_scorer: read_artifact("sentence_scorer", &self.config.sentence_scorer_path())?,
            comment_classifier: read_artifact(
                "comment_classifier",
                &self.config.comment_classifier_path(),
            )?,
            sentiment_lexicon: read_artifact(
                "sentiment_lexicon",
                &self.config.sentiment_lexicon_path(),
            )?,
        })
    }

    /// Read, parse and validate all artifacts
    pub fn load(&self) -> Result<PretrainedModels> {
        info!("Loading model artifacts from {:?}", self.config.dir);
        let bytes = self.read_bytes()?;
        PretrainedModels::from_artifacts(&bytes)
    }
}

fn read_artifact(artifact: &str, path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            QaDocsError::model_load(artifact, format!("{} not found", path.display()))
        } else {
            QaDocsError::model_load(artifact, format!("cannot read {}: {}", path.display(), e))
        }
    })?;
    debug!("Read {} ({} bytes) from {:?}", artifact, bytes.len(), path);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const VECTORIZER: &str = r#"{"vocabulary": {"check": 0, "useless": 1}, "idf": [1.0, 1.5]}"#;
    const SCORER: &str =
        r#"{"kind": "logistic_regression", "coef": [2.0, -3.0], "intercept": 0.0}"#;
    const CLASSIFIER: &str = r#"{
        "kind": "logistic_regression",
        "coef": [4.0, 0.0, 0.0],
        "intercept": -2.0
    }"#;
    const LEXICON: &str = "useless\t-1.8\t0.4\t[-2]\n";

    fn write_artifacts(dir: &Path) {
        fs::write(dir.join("vectorizer.json"), VECTORIZER).unwrap();
        fs::write(dir.join("sentence_scorer.json"), SCORER).unwrap();
        fs::write(dir.join("comment_classifier.json"), CLASSIFIER).unwrap();
        fs::write(dir.join("vader_lexicon.txt"), LEXICON).unwrap();
    }

    fn store_in(dir: &Path) -> ModelStore {
        ModelStore::with_dir(ModelsConfig::default(), dir)
    }

    #[test]
    fn test_load_from_dir() {
        let temp = TempDir::new().unwrap();
        write_artifacts(temp.path());

        let models = store_in(temp.path()).load().unwrap();
        assert_eq!(models.scorer().vectorizer().n_features(), 2);
        assert_eq!(models.sentiment().lexicon_size(), 1);
        assert!(models.digests().is_some());
    }

    #[test]
    fn test_missing_artifact_is_load_error() {
        let temp = TempDir::new().unwrap();
        write_artifacts(temp.path());
        fs::remove_file(temp.path().join("comment_classifier.json")).unwrap();

        match store_in(temp.path()).load() {
            Err(QaDocsError::ModelLoad { artifact, message }) => {
                assert_eq!(artifact, "comment_classifier");
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_corrupt_artifact_is_load_error() {
        let temp = TempDir::new().unwrap();
        write_artifacts(temp.path());
        fs::write(temp.path().join("vectorizer.json"), "[]").unwrap();

        assert!(matches!(
            store_in(temp.path()).load(),
            Err(QaDocsError::ModelLoad { .. })
        ));
    }

    #[test]
    fn test_artifact_paths() {
        let store = store_in(Path::new("/models"));
        let paths = store.artifact_paths();
        assert_eq!(paths[0], ("vectorizer", PathBuf::from("/models/vectorizer.json")));
        assert_eq!(paths[3].1, PathBuf::from("/models/vader_lexicon.txt"));
        assert_eq!(store.dir(), Path::new("/models"));
    }
}
