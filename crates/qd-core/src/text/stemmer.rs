//! Porter stemming
//!
//! Stems with the original Porter algorithm plus the NLTK irregular-form
//! table. Vectorizer vocabularies are fitted on these stems.

/// Irregular forms mapped straight to their stem
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("skies", "sky"),
    ("sky", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

/// Porter stemmer for lowercase words
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Stem an already-lowercased word
    pub fn stem(&self, word: &str) -> String {
        if word.chars().count() <= 2 {
            return word.to_string();
        }
        if let Some((_, stem)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
            return (*stem).to_string();
        }
        // The algorithm is defined over ASCII letters
        if !word.is_ascii() {
            return word.to_string();
        }
        porter_stemmer::stem(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_porter_stems() {
        let stemmer = PorterStemmer::new();
        let cases = [
            ("generously", "gener"),
            ("fairly", "fairli"),
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("running", "run"),
            ("details", "detail"),
            ("check", "check"),
            ("useless", "useless"),
        ];
        for (word, expected) in cases {
            assert_eq!(stemmer.stem(word), expected, "stem of {word}");
        }
    }

    #[test]
    fn test_irregular_forms() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("dying"), "die");
        assert_eq!(stemmer.stem("skies"), "sky");
        assert_eq!(stemmer.stem("news"), "news");
    }

    #[test]
    fn test_short_and_non_ascii_words_unchanged() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("café"), "café");
    }
}
