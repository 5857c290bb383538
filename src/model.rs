use serde::{Deserialize, Serialize};

/// One dataset row. Field order matches the CSV column order, so serde
/// derives both the header row and the positional layout from this struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub likes: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub examples: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub follow_up: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub companies: String,
    #[serde(default)]
    pub related_topics: String,
    #[serde(default)]
    pub similar_questions: String,
}

/// Listing-page intermediate: id and title split out of "1. Two Sum",
/// plus the absolutized problem URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSummary {
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse; anything unrecognized falls back to Easy.
    pub fn parse(s: &str) -> Difficulty {
        match s.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

// ── Tests ──
