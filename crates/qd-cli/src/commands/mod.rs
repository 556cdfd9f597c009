//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod doctor;
pub mod generate;
pub mod notes;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qd_core::config::Config;
use qd_core::model::PretrainedModels;
use qd_storage::{ConfigLocator, ModelStore};
use std::path::{Path, PathBuf};

/// qa-docs - Comment-aware Q&A documentation generator
#[derive(Debug, Parser)]
#[command(name = "qa-docs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate question and tag pages from a dump
    Generate(generate::GenerateArgs),

    /// Show how a single comment is filtered
    Notes(notes::NotesArgs),

    /// Check configuration and model artifacts
    Doctor(doctor::DoctorArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let locator = ConfigLocator::new(cli.config);

    match cli.command {
        Commands::Generate(args) => generate::execute(args, &locator),
        Commands::Notes(args) => notes::execute(args, &locator),
        Commands::Doctor(args) => doctor::execute(args, &locator),
        Commands::Config(cmd) => config::execute(cmd, &locator),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the resolved configuration
pub(crate) fn load_config(locator: &ConfigLocator) -> Result<Config> {
    let (config, path) = locator.load().context("Failed to load configuration")?;
    if let Some(path) = path {
        tracing::info!("Using config {:?}", path);
    }
    Ok(config)
}

/// Load pretrained models, optionally from a directory other than the
/// configured one
pub(crate) fn load_models(config: &Config, dir: Option<&Path>) -> Result<PretrainedModels> {
    let store = match dir {
        Some(dir) => ModelStore::with_dir(config.models.clone(), dir),
        None => ModelStore::new(config.models.clone()),
    };
    store
        .load()
        .with_context(|| format!("Failed to load model artifacts from {}", store.dir().display()))
}
