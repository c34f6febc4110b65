use serde::{Deserialize, Serialize};

/// Scored review of a resume or cover letter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentAnalysis {
    pub overall: u32,
    #[serde(default)]
    pub sections: Vec<SectionFeedback>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionFeedback {
    pub name: String,
    pub score: u32,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub id: String,
    /// Section key the suggestion targets, e.g. `summary` or `closing`.
    #[serde(rename = "type")]
    pub kind: String,
    pub section: String,
    pub content: String,
    pub reason: String,
    #[serde(default)]
    pub index: Option<u32>,
}
