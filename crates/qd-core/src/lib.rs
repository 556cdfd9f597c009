//! qd-core - Core library for qa-docs
//!
//! This crate turns Q&A dumps into documentation pages. It holds the
//! comment usefulness pipeline (normalization, scoring, sentiment and the
//! keep/drop classifier), page rendering, configuration and error types.

pub mod error;
pub mod types;
pub mod config;
pub mod text;
pub mod model;
pub mod comment;
pub mod page;
pub mod source;

pub use error::{QaDocsError, Result};
pub use types::*;
