//! Loading of input dumps

use qd_core::error::{QaDocsError, Result};
use qd_core::source::SourceDump;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads a JSON dump of questions and tags
pub struct SourceStore {
    path: PathBuf,
}

impl SourceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the dump
    pub fn load(&self) -> Result<SourceDump> {
        let file = fs::File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                QaDocsError::FileNotFound(self.path.clone())
            } else {
                QaDocsError::Io(e)
            }
        })?;

        let reader = BufReader::new(file);
        let dump: SourceDump = serde_json::from_reader(reader).map_err(|e| {
            QaDocsError::from(e).with_context(format!("Invalid dump {}", self.path.display()))
        })?;

        let unanswered = dump.questions.iter().filter(|q| q.answer.is_none()).count();
        if unanswered > 0 {
            warn!("{} question(s) in {:?} have no answer", unanswered, self.path);
        }
        debug!(
            "Loaded {} questions and {} tags from {:?}",
            dump.questions.len(),
            dump.tags.len(),
            self.path
        );

        Ok(dump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_dump() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dump.json");
        fs::write(
            &path,
            r#"{"questions": [{"title": "Why?", "body": "b", "answer": {"body": "a"}}],
                "tags": [{"name": "rust", "wiki_body": "w"}]}"#,
        )
        .unwrap();

        let dump = SourceStore::new(&path).load().unwrap();
        assert_eq!(dump.questions.len(), 1);
        assert_eq!(dump.tags[0].name, "rust");
    }

    #[test]
    fn test_missing_dump() {
        let temp = TempDir::new().unwrap();
        let store = SourceStore::new(temp.path().join("missing.json"));
        assert!(matches!(store.load(), Err(QaDocsError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_dump() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dump.json");
        fs::write(&path, "not json").unwrap();

        let err = SourceStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Invalid dump"));
    }
}
