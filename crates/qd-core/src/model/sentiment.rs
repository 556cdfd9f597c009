//! Lexicon-based compound sentiment (VADER rules)
//!
//! Scores surface text: capitalization, punctuation and negation all carry
//! signal here, so the analyzer runs on the stripped sentence, never on the
//! normalized token string.

use crate::error::{QaDocsError, Result};
use crate::types::Placeholder;
use std::collections::HashMap;

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
    "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
    "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping", "flippin",
    "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully", "fuckin",
    "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely", "incredible",
    "incredibly", "intensely", "major", "majorly", "more", "most", "particularly", "purely",
    "quite", "really", "remarkably", "so", "substantially", "thoroughly", "total", "totally",
    "tremendous", "tremendously", "uber", "unbelievably", "unusually", "utter", "utterly", "very",
];

const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less", "little", "marginal",
    "marginally", "occasional", "occasionally", "partly", "scarce", "scarcely", "slight",
    "slightly", "somewhat", "sorta", "sortof", "sort-of",
];

/// Maps raw sentences to a compound polarity in `[-1, 1]`
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<String, f64>,
}

impl SentimentAnalyzer {
    /// Create an analyzer from an in-memory lexicon
    pub fn new(lexicon: HashMap<String, f64>) -> Self {
        Self { lexicon }
    }

    /// Parse a VADER lexicon: `token<TAB>mean<TAB>…` per line
    pub fn from_lexicon_str(content: &str) -> Result<Self> {
        let mut lexicon = HashMap::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default();
            let valence = fields
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| {
                    QaDocsError::model_load(
                        "sentiment_lexicon",
                        format!("line {}: expected `token<TAB>valence`", line_no + 1),
                    )
                })?;
            lexicon.insert(token.to_string(), valence);
        }
        if lexicon.is_empty() {
            return Err(QaDocsError::model_load("sentiment_lexicon", "lexicon is empty"));
        }
        Ok(Self::new(lexicon))
    }

    /// Number of lexicon entries
    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    /// Compound polarity of a sentence
    pub fn sentiment_of(&self, text: &str) -> f64 {
        let words = split_words(text);
        if words.is_empty() {
            return 0.0;
        }
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let cap_diff = is_cap_diff(&words);

        let mut valences: Vec<f64> = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            if booster_scalar(&lowered[i]).is_some() {
                valences.push(0.0);
                continue;
            }
            valences.push(self.word_valence(i, &words, &lowered, cap_diff));
        }

        if let Some(but) = lowered.iter().position(|w| w == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < but {
                    *valence *= 0.5;
                } else if i > but {
                    *valence *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        round4(normalize(sum))
    }

    fn word_valence(&self, i: usize, words: &[&str], lowered: &[String], cap_diff: bool) -> f64 {
        let Some(&base) = self.lexicon.get(&lowered[i]) else {
            return 0.0;
        };

        let mut valence = base;
        if cap_diff && is_all_caps(words[i]) {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let prev = i - distance;
            if self.lexicon.contains_key(&lowered[prev]) {
                continue;
            }
            let mut scalar = scalar_inc_dec(words[prev], &lowered[prev], valence, cap_diff);
            match distance {
                2 => scalar *= 0.95,
                3 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;
            if is_negated(&lowered[prev]) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

/// Whitespace words with edge punctuation trimmed; placeholders are not words
fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| {
            let bare =
                token.trim_matches(|c: char| c.is_ascii_punctuation() && !matches!(c, '<' | '>'));
            !Placeholder::is_protected(bare)
        })
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            // Short tokens may be emoticons such as ":)" or ":-("
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .filter(|w| w.chars().count() > 1)
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

/// True when some, but not all, words are ALL CAPS
fn is_cap_diff(words: &[&str]) -> bool {
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    caps > 0 && caps < words.len()
}

fn booster_scalar(lowered: &str) -> Option<f64> {
    if BOOSTERS.contains(&lowered) {
        Some(BOOST_INCREMENT)
    } else if DAMPENERS.contains(&lowered) {
        Some(BOOST_DECREMENT)
    } else {
        None
    }
}

fn scalar_inc_dec(word: &str, lowered: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster_scalar(lowered) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_all_caps(word) {
        scalar += if valence > 0.0 {
            CAPS_INCREMENT
        } else {
            -CAPS_INCREMENT
        };
    }
    scalar
}

fn is_negated(lowered: &str) -> bool {
    NEGATIONS.contains(&lowered) || lowered.contains("n't")
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_emphasis
}

fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SentimentAnalyzer {
        SentimentAnalyzer::from_lexicon_str(
            "good\t1.9\t0.9\t[2, 2]\ngreat\t3.1\t0.7\t[3, 3]\nbad\t-2.5\t0.6\t[-2, -3]\nuseless\t-1.8\t0.4\t[-2]\nthanks\t1.9\t0.5\t[2]\n",
        )
        .unwrap()
    }

    #[test]
    fn test_neutral_sentence() {
        assert_eq!(analyzer().sentiment_of("check the docs for details."), 0.0);
        assert_eq!(analyzer().sentiment_of(""), 0.0);
    }

    #[test]
    fn test_polarity_sign() {
        let a = analyzer();
        assert!(a.sentiment_of("This is good.") > 0.0);
        assert!(a.sentiment_of("This is useless.") < 0.0);
    }

    #[test]
    fn test_compound_matches_normalization() {
        let score = analyzer().sentiment_of("good");
        let expected = round4(1.9 / (1.9_f64 * 1.9 + 15.0).sqrt());
        assert_eq!(score, expected);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let a = analyzer();
        assert!(a.sentiment_of("This is not good") < 0.0);
        assert!(a.sentiment_of("It isn't bad") > 0.0);
    }

    #[test]
    fn test_booster_increases_intensity() {
        let a = analyzer();
        assert!(a.sentiment_of("This is very good") > a.sentiment_of("This is good"));
        assert!(a.sentiment_of("This is slightly good") < a.sentiment_of("This is good"));
    }

    #[test]
    fn test_caps_and_exclamation_emphasis() {
        let a = analyzer();
        assert!(a.sentiment_of("this is GREAT") > a.sentiment_of("this is great"));
        assert!(a.sentiment_of("this is great!!") > a.sentiment_of("this is great"));
    }

    #[test]
    fn test_placeholders_are_not_words() {
        let a = analyzer();
        assert_eq!(a.sentiment_of("this is very <URL> good"), a.sentiment_of("this is very good"));
        assert_eq!(a.sentiment_of("<CODE> is GREAT"), a.sentiment_of("is GREAT"));
        assert_eq!(split_words("see (<URL>), <CODE>."), vec!["see"]);
    }

    #[test]
    fn test_but_shifts_weight() {
        let a = analyzer();
        assert!(a.sentiment_of("The docs are bad but the answer is great") > 0.0);
    }

    #[test]
    fn test_range() {
        let a = analyzer();
        let score = a.sentiment_of("GREAT GREAT great good good thanks thanks!!!!");
        assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn test_invalid_lexicon() {
        assert!(SentimentAnalyzer::from_lexicon_str("good\tnot-a-number\n").is_err());
        assert!(SentimentAnalyzer::from_lexicon_str("\n\n").is_err());
    }
}
