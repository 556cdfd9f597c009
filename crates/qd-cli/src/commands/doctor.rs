//! Doctor command
//!
//! Diagnose configuration and model artifacts.

use anyhow::{bail, Result};
use clap::Args;
use qd_core::config::Config;
use qd_storage::{ConfigLocator, ModelStore};
use std::path::PathBuf;

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Model artifact directory (defaults to models.dir from config)
    #[arg(long, short)]
    pub models: Option<PathBuf>,

    /// Show suggestions for every check
    #[arg(long)]
    pub suggestions: bool,
}

/// Check result
struct CheckResult {
    name: String,
    passed: bool,
    message: String,
    suggestion: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Execute the doctor command
pub fn execute(args: DoctorArgs, locator: &ConfigLocator) -> Result<()> {
    use colored::Colorize;

    let mut results = Vec::new();

    println!("\n{}", "1. Configuration".bold().underline());
    let (config_results, config) = check_configuration(locator);
    results.extend(config_results);

    println!("\n{}", "2. Model Artifacts".bold().underline());
    let store = match &args.models {
        Some(dir) => ModelStore::with_dir(config.models.clone(), dir),
        None => ModelStore::new(config.models.clone()),
    };
    results.extend(check_models(&store));

    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    for result in &results {
        let status = if !result.passed {
            "✗".red()
        } else if result.is_warning() {
            "⚠".yellow()
        } else {
            "✓".green()
        };

        println!("   {} {}: {}", status, result.name, result.message);

        if args.suggestions {
            if let Some(suggestion) = &result.suggestion {
                println!("     {}", suggestion.dimmed());
            }
        }

        if !result.passed {
            errors.push(result);
        } else if result.is_warning() {
            warnings.push(result);
        }
    }

    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.len().to_string().yellow(),
        errors.len().to_string().red()
    );

    if !errors.is_empty() {
        println!("\n{}", "✗ Errors:".red());
        for result in &errors {
            println!("  - {}: {}", result.name, result.message);
            if let Some(suggestion) = &result.suggestion {
                println!("    Fix: {}", suggestion);
            }
        }
        bail!("{} check(s) failed", errors.len());
    }

    if warnings.is_empty() {
        println!("\n{} All checks passed!", "✓".green());
    }

    Ok(())
}

fn check_configuration(locator: &ConfigLocator) -> (Vec<CheckResult>, Config) {
    let mut results = vec![CheckResult::ok("qa-docs version", env!("CARGO_PKG_VERSION"))];

    let config = match locator.load() {
        Ok((config, Some(path))) => {
            results.push(CheckResult::ok("Config", &format!("{} (valid)", path.display())));
            config
        }
        Ok((config, None)) => {
            results.push(CheckResult::warn(
                "Config",
                "no config file, using defaults",
                Some("Run 'qa-docs config init' to create one"),
            ));
            config
        }
        Err(e) => {
            results.push(CheckResult::fail(
                "Config",
                &e.to_string(),
                Some("Fix the file or run 'qa-docs config init --force'"),
            ));
            Config::default()
        }
    };

    (results, config)
}

fn check_models(store: &ModelStore) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if !store.dir().is_dir() {
        results.push(CheckResult::fail(
            "Model directory",
            &format!("{} not found", store.dir().display()),
            Some("Set models.dir in the config or pass --models"),
        ));
        return results;
    }
    results.push(CheckResult::ok(
        "Model directory",
        &store.dir().display().to_string(),
    ));

    let mut missing = false;
    for (name, path) in store.artifact_paths() {
        if !path.exists() {
            missing = true;
            results.push(CheckResult::fail(
                name,
                &format!("{} not found", path.display()),
                None,
            ));
        }
    }
    if missing {
        return results;
    }

    match store.load() {
        Ok(models) => {
            if let Some(digests) = models.digests() {
                for (name, digest) in digests.entries() {
                    results.push(CheckResult::ok(name, &format!("blake3 {}", digest.short())));
                }
            }
            results.push(CheckResult::ok(
                "Sentiment lexicon",
                &format!("{} entries", models.sentiment().lexicon_size()),
            ));
            results.push(CheckResult::ok(
                "Vocabulary",
                &format!("{} terms", models.scorer().vectorizer().n_features()),
            ));
        }
        Err(e) => {
            results.push(CheckResult::fail(
                "Model load",
                &e.to_string(),
                Some("Re-export the artifacts from the training pipeline"),
            ));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "message");
        assert!(result.passed);
        assert!(!result.is_warning());
        assert!(result.suggestion.is_none());
    }

    #[test]
    fn test_check_result_fail() {
        let result = CheckResult::fail("test", "error", Some("fix it"));
        assert!(!result.passed);
        assert!(result.suggestion.is_some());
    }

    #[test]
    fn test_check_result_warn() {
        let result = CheckResult::warn("test", "careful", None);
        assert!(result.passed);
        assert!(result.is_warning());
    }

    #[test]
    fn test_missing_model_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = ModelStore::with_dir(Config::default().models, temp.path().join("missing"));
        let results = check_models(&store);
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
    }

    #[test]
    fn test_missing_artifacts_listed() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = ModelStore::with_dir(Config::default().models, temp.path());
        let results = check_models(&store);
        let failed = results.iter().filter(|r| !r.passed).count();
        assert_eq!(failed, 4);
    }
}
