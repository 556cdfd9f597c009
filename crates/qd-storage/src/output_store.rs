//! Output directory layout for generated pages

use qd_core::config::OutputConfig;
use qd_core::error::{QaDocsError, Result};
use qd_core::page::slugify;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output directory with one subdirectory per page kind
pub struct OutputStore {
    base_dir: PathBuf,
    questions_dir: PathBuf,
    tags_dir: PathBuf,
    extension: String,
}

impl OutputStore {
    pub fn new(config: &OutputConfig) -> Self {
        Self::with_dir(config, config.dir.clone())
    }

    /// Same layout, different base directory
    pub fn with_dir(config: &OutputConfig, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            questions_dir: base_dir.join(&config.questions_dir),
            tags_dir: base_dir.join(&config.tags_dir),
            extension: config.extension.clone(),
            base_dir,
        }
    }

    /// Create the directories; with `clean`, remove any previous output first
    pub fn prepare(&self, clean: bool) -> Result<()> {
        if clean && self.base_dir.exists() {
            fs::remove_dir_all(&self.base_dir).map_err(|e| {
                QaDocsError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to clean output directory: {}", e),
                ))
            })?;
            info!("Removed output directory {:?}", self.base_dir);
        }

        for dir in [&self.questions_dir, &self.tags_dir] {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
                debug!("Created output directory: {:?}", dir);
            }
        }
        Ok(())
    }

    /// Path of the page for a question
    ///
    /// The file stem is `<id>-<slug>` when the question has an id, so titles
    /// that slugify alike still get their own page.
    pub fn question_path(&self, id: Option<u64>, title: &str) -> PathBuf {
        let slug = slugify(title);
        let stem = match (id, slug.is_empty()) {
            (Some(id), false) => format!("{}-{}", id, slug),
            (Some(id), true) => id.to_string(),
            (None, false) => slug,
            (None, true) => "question".to_string(),
        };
        self.questions_dir
            .join(format!("{}.{}", stem, self.extension))
    }

    /// Path of the page for a tag name
    pub fn tag_path(&self, name: &str) -> PathBuf {
        self.tags_dir
            .join(format!("{}.{}", name.replace('/', "-"), self.extension))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &Path) -> OutputStore {
        OutputStore::with_dir(&OutputConfig::default(), dir)
    }

    #[test]
    fn test_prepare_creates_dirs() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp.path().join("docs"));
        store.prepare(false).unwrap();

        assert!(temp.path().join("docs/questions").is_dir());
        assert!(temp.path().join("docs/tags").is_dir());
    }

    #[test]
    fn test_prepare_clean_removes_old_pages() {
        let temp = TempDir::new().unwrap();
        let store = store_in(temp.path());
        store.prepare(false).unwrap();
        let stale = store.tag_path("stale");
        fs::write(&stale, "old").unwrap();

        store.prepare(true).unwrap();
        assert!(!stale.exists());
        assert!(temp.path().join("tags").is_dir());
    }

    #[test]
    fn test_prepare_keeps_pages_without_clean() {
        let temp = TempDir::new().unwrap();
        let store = store_in(temp.path());
        store.prepare(false).unwrap();
        let kept = store.question_path(Some(1), "Kept?");
        fs::write(&kept, "page").unwrap();

        store.prepare(false).unwrap();
        assert_eq!(fs::read_to_string(&kept).unwrap(), "page");
    }

    #[test]
    fn test_page_paths() {
        let store = store_in(Path::new("/out"));
        assert_eq!(
            store.question_path(Some(42), "How do I test this?"),
            PathBuf::from("/out/questions/42-how-do-i-test-this.md")
        );
        assert_eq!(
            store.question_path(None, "How do I test this?"),
            PathBuf::from("/out/questions/how-do-i-test-this.md")
        );
        assert_eq!(
            store.tag_path("unit-testing"),
            PathBuf::from("/out/tags/unit-testing.md")
        );
    }

    #[test]
    fn test_similar_titles_get_distinct_paths() {
        let store = store_in(Path::new("/out"));
        assert_ne!(
            store.question_path(Some(1), "Why?"),
            store.question_path(Some(2), "why")
        );
    }

    #[test]
    fn test_empty_slug_falls_back() {
        let store = store_in(Path::new("/out"));
        assert_eq!(
            store.question_path(Some(7), "?"),
            PathBuf::from("/out/questions/7.md")
        );
        assert_eq!(
            store.question_path(None, "?"),
            PathBuf::from("/out/questions/question.md")
        );
    }
}
