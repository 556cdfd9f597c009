//! Conversion helpers used to derive page fields

use crate::error::Result;

/// Converts HTML bodies to Markdown
pub trait HtmlConverter: Send + Sync {
    fn convert(&self, html: &str) -> Result<String>;
}

/// [`HtmlConverter`] backed by the `html2md` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2MdConverter;

impl HtmlConverter for Html2MdConverter {
    fn convert(&self, html: &str) -> Result<String> {
        Ok(html2md::parse_html(html))
    }
}

/// `unit-testing` → `Unit Testing`
pub fn humanize_tag_name(name: &str) -> String {
    name.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First character uppercased, the rest lowercased
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Human-readable title → kebab-case file stem
///
/// `How do I mock a trait/struct?` → `how-do-i-mock-a-traitstruct`
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .replace(['?', '/'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_tag_name() {
        assert_eq!(humanize_tag_name("unit-testing"), "Unit Testing");
        assert_eq!(humanize_tag_name("rust"), "Rust");
        assert_eq!(humanize_tag_name("c++"), "C++");
        assert_eq!(humanize_tag_name("jQuery-UI"), "Jquery Ui");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("How do I mock a trait/struct?"),
            "how-do-i-mock-a-traitstruct"
        );
        assert_eq!(slugify("  Unit   Testing "), "unit-testing");
    }

    #[test]
    fn test_html2md_converter() {
        let md = Html2MdConverter.convert("<p>Use <code>cargo test</code></p>").unwrap();
        assert!(md.contains("`cargo test`"));
        assert!(!md.contains("<p>"));
    }

    #[test]
    fn test_html2md_plain_text() {
        let md = Html2MdConverter.convert("plain text").unwrap();
        assert_eq!(md.trim(), "plain text");
    }
}
