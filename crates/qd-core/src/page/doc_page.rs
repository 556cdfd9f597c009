//! Renderable documentation pages

use super::convert::{humanize_tag_name, HtmlConverter};
use super::frontmatter::{render_frontmatter, HeaderAttrs, HeaderValue};
use crate::comment::CommentFilter;
use crate::error::{QaDocsError, Result};
use crate::source::{QuestionSource, TagSource};
use crate::text::SentenceSegmenter;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Fields derived once when a page is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub tags: Option<Vec<String>>,
}

/// A page ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocPage {
    /// Tag wiki page
    Tag(PageFields),
    /// Question page holding the answer only
    Question(PageFields),
    /// Question page with the question body as context and filtered comments
    QuestionWithNotes(PageFields),
}

impl DocPage {
    pub fn from_tag(tag: &TagSource, converter: &dyn HtmlConverter) -> Result<Self> {
        Ok(DocPage::Tag(PageFields {
            title: humanize_tag_name(&tag.name),
            description: tag.description.clone(),
            content: converter.convert(&tag.wiki_body)?,
            tags: None,
        }))
    }

    pub fn from_question(question: &QuestionSource, converter: &dyn HtmlConverter) -> Result<Self> {
        let answer = answer_body(question)?;
        Ok(DocPage::Question(PageFields {
            title: question_title(&question.title),
            description: None,
            content: converter.convert(answer)?,
            tags: Some(question.tags.clone()),
        }))
    }

    pub fn from_question_with_notes<S: SentenceSegmenter>(
        question: &QuestionSource,
        filter: &CommentFilter<'_, S>,
        converter: &dyn HtmlConverter,
    ) -> Result<Self> {
        let answer = answer_body(question)?;

        let mut content = String::from("## Context\n\n");
        content.push_str(&converter.convert(&question.body)?);
        content.push_str("\n\n---\n\n");
        content.push_str(&converter.convert(answer)?);
        content.push_str(&filter.render_notes(&question.comments)?);

        Ok(DocPage::QuestionWithNotes(PageFields {
            title: question_title(&question.title),
            description: None,
            content,
            tags: Some(question.tags.clone()),
        }))
    }

    pub fn fields(&self) -> &PageFields {
        match self {
            DocPage::Tag(f) | DocPage::Question(f) | DocPage::QuestionWithNotes(f) => f,
        }
    }

    pub fn title(&self) -> &str {
        &self.fields().title
    }

    pub fn description(&self) -> Option<&str> {
        self.fields().description.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.fields().content
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.fields().tags.as_deref()
    }

    /// Short name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DocPage::Tag(_) => "tag",
            DocPage::Question(_) => "question",
            DocPage::QuestionWithNotes(_) => "question_with_notes",
        }
    }

    /// Header attributes in output order; empty optional values are omitted
    pub fn header_attrs(&self) -> HeaderAttrs {
        let title = self.title().to_string();
        let mut attrs = vec![
            ("title", HeaderValue::Text(title.clone())),
            ("metaTitle", HeaderValue::Text(title)),
        ];

        if let Some(description) = self.description().filter(|d| !d.is_empty()) {
            attrs.push(("metaDescription", HeaderValue::Text(description.to_string())));
        }
        if let Some(tags) = self.tags().filter(|t| !t.is_empty()) {
            attrs.push(("tags", HeaderValue::List(tags.to_vec())));
        }

        attrs
    }

    /// Full page text: header block followed by content
    pub fn generate(&self) -> String {
        let mut page = render_frontmatter(&self.header_attrs());
        page.push_str(self.content());
        page
    }

    /// Write the page, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        {
            let mut file = fs::File::create(path)?;
            file.write_all(self.generate().as_bytes())?;
            file.flush()?;
        }

        Ok(())
    }
}

fn question_title(title: &str) -> String {
    title.trim().trim_end_matches('?').trim_end().to_string()
}

fn answer_body(question: &QuestionSource) -> Result<&str> {
    question
        .answer
        .as_ref()
        .map(|a| a.body.as_str())
        .ok_or_else(|| {
            QaDocsError::InvalidInput(format!("Question '{}' has no answer", question.title))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifacts::fixtures;
    use crate::page::Html2MdConverter;
    use crate::source::AnswerSource;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Passes text through untouched so content can be asserted exactly
    struct Identity;

    impl HtmlConverter for Identity {
        fn convert(&self, html: &str) -> Result<String> {
            Ok(html.to_string())
        }
    }

    struct Failing;

    impl HtmlConverter for Failing {
        fn convert(&self, _html: &str) -> Result<String> {
            Err(QaDocsError::Conversion("bad markup".to_string()))
        }
    }

    fn question(comments: Vec<&str>) -> QuestionSource {
        QuestionSource {
            id: Some(1),
            title: "How do I test this?".to_string(),
            body: "Question body".to_string(),
            tags: vec!["rust".to_string(), "unit-testing".to_string()],
            answer: Some(AnswerSource {
                body: "Answer body".to_string(),
            }),
            comments: comments.into_iter().map(String::from).collect(),
        }
    }

    fn tag(description: Option<&str>) -> TagSource {
        TagSource {
            name: "unit-testing".to_string(),
            description: description.map(String::from),
            wiki_body: "Wiki".to_string(),
        }
    }

    #[test]
    fn test_tag_page_without_description() {
        let page = DocPage::from_tag(&tag(None), &Identity).unwrap();
        assert_eq!(page.title(), "Unit Testing");
        assert_eq!(
            page.generate(),
            "---\ntitle: \"Unit Testing\"\nmetaTitle: \"Unit Testing\"\n---\n\nWiki"
        );
    }

    #[test]
    fn test_tag_page_with_description() {
        let page = DocPage::from_tag(&tag(Some("Testing units")), &Identity).unwrap();
        let keys: Vec<&str> = page.header_attrs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["title", "metaTitle", "metaDescription"]);
    }

    #[test]
    fn test_empty_description_omitted() {
        let page = DocPage::from_tag(&tag(Some("")), &Identity).unwrap();
        assert!(!page.generate().contains("metaDescription"));
    }

    #[test]
    fn test_question_page() {
        let page = DocPage::from_question(&question(vec![]), &Identity).unwrap();
        assert_eq!(page.kind(), "question");
        assert_eq!(page.title(), "How do I test this");
        assert_eq!(
            page.generate(),
            "---\ntitle: \"How do I test this\"\nmetaTitle: \"How do I test this\"\ntags: [rust, unit-testing]\n---\n\nAnswer body"
        );
    }

    #[test]
    fn test_question_without_tags_omits_header() {
        let mut q = question(vec![]);
        q.tags.clear();
        let page = DocPage::from_question(&q, &Identity).unwrap();
        assert!(!page.generate().contains("tags:"));
    }

    #[test]
    fn test_question_without_answer_is_error() {
        let mut q = question(vec![]);
        q.answer = None;
        assert!(matches!(
            DocPage::from_question(&q, &Identity),
            Err(QaDocsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_question_with_no_comments_has_no_notes() {
        let models = fixtures::models();
        let filter = CommentFilter::new(&models);
        let page = DocPage::from_question_with_notes(&question(vec![]), &filter, &Identity).unwrap();
        assert_eq!(page.content(), "## Context\n\nQuestion body\n\n---\n\nAnswer body");
        assert!(!page.generate().contains("## Notes"));
    }

    #[test]
    fn test_question_with_notes() {
        let models = fixtures::models();
        let filter = CommentFilter::new(&models);
        let page = DocPage::from_question_with_notes(
            &question(vec!["This is useless. @bob check https://x.com/y for details."]),
            &filter,
            &Identity,
        )
        .unwrap();
        assert_eq!(
            page.content(),
            "## Context\n\nQuestion body\n\n---\n\nAnswer body\n\n---\n\n## Notes:\n\n- check <URL> for details.\n"
        );
    }

    #[test]
    fn test_all_comments_dropped_has_no_notes() {
        let models = fixtures::models();
        let filter = CommentFilter::new(&models);
        let page =
            DocPage::from_question_with_notes(&question(vec!["This is useless."]), &filter, &Identity)
                .unwrap();
        assert!(!page.content().contains("## Notes"));
    }

    #[test]
    fn test_conversion_error_propagates() {
        assert!(matches!(
            DocPage::from_tag(&tag(None), &Failing),
            Err(QaDocsError::Conversion(_))
        ));
    }

    #[test]
    fn test_html_body_converted() {
        let mut t = tag(None);
        t.wiki_body = "<p>Use <code>cargo test</code></p>".to_string();
        let page = DocPage::from_tag(&t, &Html2MdConverter).unwrap();
        assert!(page.content().contains("`cargo test`"));
    }

    #[test]
    fn test_save_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags").join("unit-testing.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x".repeat(4096)).unwrap();

        let page = DocPage::from_tag(&tag(None), &Identity).unwrap();
        page.save(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), page.generate());
    }

    #[test]
    fn test_save_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("page.md");
        let page = DocPage::from_tag(&tag(None), &Identity).unwrap();
        page.save(&path).unwrap();
        assert!(path.exists());
    }
}
