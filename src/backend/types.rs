//! Wire and result types for the guidance backend

use serde::{Deserialize, Serialize};

/// Request body sent to `/saarathi`
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub q: &'a str,
}

/// Normalised answer. Every field is optional; absent and blank are
/// treated the same when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanskrit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<String>,
}

impl GuidanceResult {
    /// Free text answer
    pub fn meaning(text: impl Into<String>) -> Self {
        Self {
            meaning: Some(text.into()),
            ..Self::default()
        }
    }

    /// True when no field carries any non-whitespace text
    pub fn is_empty(&self) -> bool {
        [
            &self.sanskrit,
            &self.transliteration,
            &self.meaning,
            &self.chapter,
            &self.verse,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}
