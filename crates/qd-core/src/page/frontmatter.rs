//! Front matter rendering
//!
//! Pages start with a `---` delimited block of `key: value` lines. Strings
//! are written as double-quoted scalars; tag lists as flow sequences.

use regex::Regex;
use std::sync::LazyLock;

static PLAIN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9.+#_-]*$").expect("valid regex"));

/// Value of a header attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    List(Vec<String>),
}

/// Ordered header attributes
pub type HeaderAttrs = Vec<(&'static str, HeaderValue)>;

/// Render a header block, including the blank line that separates it from
/// the page content
pub fn render_frontmatter(attrs: &[(&'static str, HeaderValue)]) -> String {
    let mut fm = String::new();
    fm.push_str("---\n");
    for (key, value) in attrs {
        let rendered = match value {
            HeaderValue::Text(text) => quote(text),
            HeaderValue::List(items) => format!(
                "[{}]",
                items.iter().map(|i| tag_scalar(i)).collect::<Vec<_>>().join(", ")
            ),
        };
        fm.push_str(&format!("{}: {}\n", key, rendered));
    }
    fm.push_str("---\n\n");
    fm
}

/// Double-quoted scalar with `\`, `"` and line breaks escaped
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn tag_scalar(tag: &str) -> String {
    if PLAIN_TAG_RE.is_match(tag) {
        tag.to_string()
    } else {
        quote(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_text_attrs() {
        let fm = render_frontmatter(&[
            ("title", HeaderValue::Text("Unit Testing".to_string())),
            ("metaTitle", HeaderValue::Text("Unit Testing".to_string())),
        ]);
        assert_eq!(
            fm,
            "---\ntitle: \"Unit Testing\"\nmetaTitle: \"Unit Testing\"\n---\n\n"
        );
    }

    #[test]
    fn test_render_tags() {
        let fm = render_frontmatter(&[(
            "tags",
            HeaderValue::List(vec![
                "rust".to_string(),
                "c++".to_string(),
                "c#".to_string(),
                "Hello World".to_string(),
            ]),
        )]);
        assert_eq!(fm, "---\ntags: [rust, c++, c#, \"Hello World\"]\n---\n\n");
    }

    #[test]
    fn test_quotes_escaped() {
        assert_eq!(quote(r#"Why "move" \ copy"#), r#""Why \"move\" \\ copy""#);
        assert_eq!(quote("two\nlines"), "\"two\\nlines\"");
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(render_frontmatter(&[]), "---\n---\n\n");
    }
}
