//! Generate command
//!
//! Render every answered question and every tag in a dump to Markdown.

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use qd_core::comment::CommentFilter;
use qd_core::page::{DocPage, Html2MdConverter};
use qd_core::source::QuestionSource;
use qd_core::text::RuleSegmenter;
use qd_storage::{ConfigLocator, OutputStore, SourceStore};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::{load_config, load_models};

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// JSON dump of questions and tags
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output directory (defaults to output.dir from config)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Model artifact directory (defaults to models.dir from config)
    #[arg(long, short)]
    pub models: Option<PathBuf>,

    /// Remove the output directory before generating
    #[arg(long)]
    pub clean: bool,

    /// Render answer-only question pages without Notes
    #[arg(long)]
    pub no_notes: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, locator: &ConfigLocator) -> Result<()> {
    use colored::Colorize;

    let config = load_config(locator)?;

    // Models first: a bad artifact must stop the run before any page is written
    let models = load_models(&config, args.models.as_deref())?;

    let dump = SourceStore::new(&args.input)
        .load()
        .with_context(|| format!("Failed to load dump {}", args.input.display()))?;

    let output = match &args.output {
        Some(dir) => OutputStore::with_dir(&config.output, dir),
        None => OutputStore::new(&config.output),
    };

    let include_notes = config.pipeline.include_notes && !args.no_notes;
    let segmenter =
        RuleSegmenter::new().with_abbreviations(config.pipeline.extra_abbreviations.iter().cloned());
    let filter = CommentFilter::with_segmenter(&models, segmenter);
    let converter = Html2MdConverter;

    let questions: Vec<&QuestionSource> = dump
        .questions
        .iter()
        .filter(|q| {
            if q.answer.is_none() {
                warn!("Skipping unanswered question '{}'", q.title);
                return false;
            }
            true
        })
        .collect();

    // Every page gets its own file; resolve clashes before touching the output
    let question_paths = assign_paths(
        &questions,
        |q| output.question_path(q.id, &q.title),
        |q| format!("question '{}'", q.title),
    )?;
    let tag_paths = assign_paths(
        &dump.tags,
        |t| output.tag_path(&t.name),
        |t| format!("tag '{}'", t.name),
    )?;

    output
        .prepare(args.clean)
        .with_context(|| format!("Failed to prepare {}", output.base_dir().display()))?;

    info!(
        "Generating {} question pages and {} tag pages (notes: {})",
        questions.len(),
        dump.tags.len(),
        include_notes
    );

    let pb = ProgressBar::new((questions.len() + dump.tags.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    questions
        .par_iter()
        .zip(question_paths.par_iter())
        .map(|(question, path)| -> Result<()> {
            let page = if include_notes {
                DocPage::from_question_with_notes(question, &filter, &converter)
            } else {
                DocPage::from_question(question, &converter)
            }
            .with_context(|| format!("Failed to render question '{}'", question.title))?;

            page.save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote {} page {:?}", page.kind(), path);
            pb.inc(1);
            Ok(())
        })
        .collect::<Result<Vec<_>>>()?;

    dump.tags
        .par_iter()
        .zip(tag_paths.par_iter())
        .map(|(tag, path)| -> Result<()> {
            let page = DocPage::from_tag(tag, &converter)
                .with_context(|| format!("Failed to render tag '{}'", tag.name))?;

            page.save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote {} page {:?}", page.kind(), path);
            pb.inc(1);
            Ok(())
        })
        .collect::<Result<Vec<_>>>()?;

    pb.finish_and_clear();

    println!(
        "{} Generated {} question pages and {} tag pages in {}",
        "✓".green(),
        questions.len().to_string().cyan(),
        dump.tags.len().to_string().cyan(),
        output.base_dir().display()
    );

    Ok(())
}

/// Output path for each item, in order; fails when two items share a file
fn assign_paths<T>(
    items: &[T],
    path_of: impl Fn(&T) -> PathBuf,
    describe: impl Fn(&T) -> String,
) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, usize> = HashMap::with_capacity(items.len());
    let mut paths = Vec::with_capacity(items.len());

    for (idx, item) in items.iter().enumerate() {
        let path = path_of(item);
        if let Some(&first) = seen.get(&path) {
            bail!(
                "{} and {} both map to {}",
                describe(&items[first]),
                describe(item),
                path.display()
            );
        }
        seen.insert(path.clone(), idx);
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::try_parse_from([
            "qa-docs", "generate", "--input", "dump.json", "-o", "site", "--clean", "--no-notes",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.input, PathBuf::from("dump.json"));
                assert_eq!(args.output, Some(PathBuf::from("site")));
                assert!(args.clean);
                assert!(args.no_notes);
                assert!(args.models.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_assign_paths_rejects_clash() {
        let titles = ["Why?", "why", "How?"];
        let err = assign_paths(
            &titles,
            |t| PathBuf::from(qd_core::page::slugify(t)),
            |t| format!("question '{}'", t),
        )
        .unwrap_err();
        assert!(err.to_string().contains("question 'Why?' and question 'why'"));

        let paths = assign_paths(&titles[1..], |t| PathBuf::from(*t), |t| t.to_string()).unwrap();
        assert_eq!(paths, vec![PathBuf::from("why"), PathBuf::from("How?")]);
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["qa-docs", "generate"]).is_err());
    }
}
