//! Input records for page generation
//!
//! A dump is a single JSON document holding the questions and tags to
//! render. Optional fields may be missing or `null`.

use serde::{Deserialize, Serialize};

/// Full input dump
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDump {
    #[serde(default)]
    pub questions: Vec<QuestionSource>,
    #[serde(default)]
    pub tags: Vec<TagSource>,
}

impl SourceDump {
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// A question with its accepted answer and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSource {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub answer: Option<AnswerSource>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSource {
    pub body: String,
}

/// A tag and its wiki
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSource {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wiki_body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
