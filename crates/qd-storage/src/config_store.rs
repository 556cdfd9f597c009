//! Configuration file discovery

use qd_core::config::Config;
use qd_core::error::{QaDocsError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file, relative to the working directory
pub const PROJECT_CONFIG: &str = ".qa-docs/config.toml";

/// Finds the configuration file to use
///
/// Lookup order: explicit path, project file, user config directory. When
/// none exists the defaults are used.
pub struct ConfigLocator {
    explicit: Option<PathBuf>,
    project: PathBuf,
    user: Option<PathBuf>,
}

impl ConfigLocator {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self::with_paths(explicit, PathBuf::from(PROJECT_CONFIG), Self::user_config_path())
    }

    pub fn with_paths(explicit: Option<PathBuf>, project: PathBuf, user: Option<PathBuf>) -> Self {
        Self {
            explicit,
            project,
            user,
        }
    }

    /// Config file in the user's config directory
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "qa-docs", "qa-docs")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .or_else(|| dirs::home_dir().map(|h| h.join(".qa-docs").join("config.toml")))
    }

    pub fn explicit(&self) -> Option<&Path> {
        self.explicit.as_deref()
    }

    pub fn project_path(&self) -> &Path {
        &self.project
    }

    /// The file that [`ConfigLocator::load`] would read, if any
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }
        if self.project.exists() {
            return Some(self.project.clone());
        }
        self.user.as_ref().filter(|p| p.exists()).cloned()
    }

    /// Load the resolved file, or the defaults when there is none
    pub fn load(&self) -> Result<(Config, Option<PathBuf>)> {
        match self.resolve() {
            Some(path) => {
                if !path.exists() {
                    return Err(QaDocsError::FileNotFound(path));
                }
                debug!("Loading config from {:?}", path);
                let config = Config::from_path(&path)?;
                Ok((config, Some(path)))
            }
            None => {
                debug!("No config file found, using defaults");
                Ok((Config::default(), None))
            }
        }
    }
}
