//! Notes command
//!
//! Run one comment through the filter and show every sentence with its
//! features and keep/drop decision.

use anyhow::{Context, Result};
use clap::Args;
use qd_core::comment::{escape_html, render_kept, CommentFilter};
use qd_core::text::RuleSegmenter;
use qd_core::ScoredSentence;
use qd_storage::ConfigLocator;
use std::fs;
use std::path::PathBuf;

use super::{load_config, load_models};

/// Arguments for the notes command
#[derive(Debug, Args)]
pub struct NotesArgs {
    /// Comment text (read from --file or stdin when omitted)
    pub text: Option<String>,

    /// Read the comment from a file
    #[arg(long, short, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Model artifact directory (defaults to models.dir from config)
    #[arg(long, short)]
    pub models: Option<PathBuf>,

    /// Print sentence records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the notes command
pub fn execute(args: NotesArgs, locator: &ConfigLocator) -> Result<()> {
    let config = load_config(locator)?;
    let models = load_models(&config, args.models.as_deref())?;

    let comment = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
        }
    };

    let segmenter =
        RuleSegmenter::new().with_abbreviations(config.pipeline.extra_abbreviations.iter().cloned());
    let filter = CommentFilter::with_segmenter(&models, segmenter);
    let sentences = filter.analyze_comment(&comment)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sentences)?);
        return Ok(());
    }

    print_sentences(&sentences);

    let fragment = render_kept(&sentences);
    println!();
    if fragment.is_empty() {
        println!("(no sentences kept)");
    } else {
        println!("{}", fragment);
    }

    Ok(())
}

fn print_sentences(sentences: &[ScoredSentence]) {
    use colored::Colorize;

    for (idx, sentence) in sentences.iter().enumerate() {
        let label = if sentence.label.is_keep() {
            "keep".green()
        } else {
            "drop".red()
        };
        println!("{} [{}] {}", format!("{:>2}.", idx + 1).dimmed(), label, escape_html(&sentence.stripped));
        println!(
            "    score={:.3} sentiment={:.3} length={}",
            sentence.features.score, sentence.features.sentiment, sentence.features.length
        );
        println!("    {}", sentence.normalized.dimmed());
    }
}
