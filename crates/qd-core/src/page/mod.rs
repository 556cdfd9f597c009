//! Documentation pages
//!
//! [`DocPage`] is a closed set of page variants sharing one header renderer.
//! Pages are built from [`crate::source`] records; HTML bodies go through an
//! [`HtmlConverter`] and question comments through a
//! [`crate::comment::CommentFilter`].
//!
//! # Example
//!
//! ```ignore
//! use qd_core::page::{DocPage, Html2MdConverter};
//!
//! let page = DocPage::from_tag(&tag, &Html2MdConverter)?;
//! page.save(&out_dir.join("tags").join("rust.md"))?;
//! ```

mod convert;
mod doc_page;
mod frontmatter;

pub use convert::{humanize_tag_name, slugify, Html2MdConverter, HtmlConverter};
pub use doc_page::{DocPage, PageFields};
pub use frontmatter::{render_frontmatter, HeaderAttrs, HeaderValue};
