//! HTML escaping for Notes text

use crate::text::tokenizer::PLACEHOLDER_RE;

/// Escape `&`, `<` and `>` so the text can be embedded in a page, leaving
/// protected placeholders such as `<URL>` verbatim
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut last = 0;

    for m in PLACEHOLDER_RE.find_iter(text) {
        escape_into(&text[last..m.start()], &mut escaped);
        escaped.push_str(m.as_str());
        last = m.end();
    }
    escape_into(&text[last..], &mut escaped);

    escaped
}

fn escape_into(segment: &str, out: &mut String) {
    for c in segment.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
