//! qa-docs - Q&A documentation generator
//!
//! Turns a JSON dump of questions, answers, comments and tag wikis into
//! Markdown pages. Comments are filtered sentence by sentence with
//! pretrained models; only useful sentences reach a page's Notes section.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default config to .qa-docs/config.toml
//! qa-docs config init
//!
//! # Check that the model artifacts load
//! qa-docs doctor
//!
//! # Generate pages
//! qa-docs generate --input dump.json --output docs --clean
//!
//! # Inspect how one comment is filtered
//! qa-docs notes "Thanks! See https://docs.rs for details."
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
