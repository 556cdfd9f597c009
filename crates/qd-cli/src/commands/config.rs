//! Config command
//!
//! Manage qa-docs configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use qd_core::config::Config;
use qd_storage::ConfigLocator;
use std::fs;
use std::path::PathBuf;

use super::load_config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file in use
    Path,

    /// Validate the configuration file
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, locator: &ConfigLocator) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(locator, json),
        ConfigCommand::Init { force } => init_config(locator, force),
        ConfigCommand::Path => print_path(locator),
        ConfigCommand::Validate => validate_config(locator),
    }
}

fn show_config(locator: &ConfigLocator, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = load_config(locator)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        match locator.resolve() {
            Some(path) => println!("{}", path.display().to_string().dimmed()),
            None => println!("{}", "(defaults)".dimmed()),
        }
        println!();
        println!("{}", config.to_toml_string()?);
    }

    Ok(())
}

/// Target of `config init`: the explicit `--config` path or the project file
fn init_target(locator: &ConfigLocator) -> PathBuf {
    locator
        .explicit()
        .unwrap_or_else(|| locator.project_path())
        .to_path_buf()
}

fn init_config(locator: &ConfigLocator, force: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = init_target(locator);

    if config_path.exists() && !force {
        eprintln!(
            "{} {} already exists. Use '{}' to overwrite.",
            "⚠".yellow(),
            config_path.display(),
            "qa-docs config init --force".cyan()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let content = format!("# qa-docs configuration\n\n{}", Config::default().to_toml_string()?);
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Wrote {}", "✓".green(), config_path.display());
    Ok(())
}

fn print_path(locator: &ConfigLocator) -> Result<()> {
    match locator.resolve() {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("(defaults)");
            println!("searched: {}", locator.project_path().display());
            if let Some(user) = ConfigLocator::user_config_path() {
                println!("searched: {}", user.display());
            }
        }
    }
    Ok(())
}

fn validate_config(locator: &ConfigLocator) -> Result<()> {
    use colored::Colorize;

    let Some(path) = locator.resolve() else {
        println!("{} No config file; defaults are valid", "✓".green());
        return Ok(());
    };

    let config = Config::from_path(&path)
        .with_context(|| format!("Configuration at {} is invalid", path.display()))?;
    println!("{} {} is valid", "✓".green(), path.display());

    if !config.models.dir.is_dir() {
        println!(
            "{} models.dir {} does not exist",
            "⚠".yellow(),
            config.models.dir.display()
        );
    }

    Ok(())
}
