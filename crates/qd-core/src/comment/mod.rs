//! Comment pipeline module
//!
//! Filters user comments down to the sentences worth keeping and renders
//! them as a Notes section.

pub mod escape;
pub mod filter;

pub use escape::escape_html;
pub use filter::{render_kept, CommentFilter, NOTES_HEADER};
