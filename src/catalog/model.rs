//! Data model for the question catalog and solve log
//!
//! The persisted document is a single JSON object holding the catalog
//! (`questions`) and the global solve log (`userProgress`).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identity of a catalog question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    /// Create a new `QuestionId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a question id cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid question id: {0:?}")]
pub struct ParseQuestionIdError(String);

impl FromStr for QuestionId {
    type Err = ParseQuestionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self).map_err(|_| ParseQuestionIdError(s.to_string()))
    }
}

/// Difficulty tier of a question
///
/// Parsed case-insensitively, always written with canonical casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    /// Warm-up level
    Easy,
    /// Typical interview level
    Medium,
    /// Stretch level
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized difficulty label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?}, expected Easy, Medium or Hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ParseDifficultyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A practice question from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique id
    pub id: QuestionId,
    /// Display title
    pub title: String,
    /// Category label shared by many questions
    pub topic: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Companies known to ask this question
    #[serde(default)]
    pub companies: Vec<String>,
    /// Problem URL
    pub link: String,
}

impl Question {
    /// Case-insensitive membership test against the company list
    pub fn asked_by(&self, company: &str) -> bool {
        let company = company.to_lowercase();
        self.companies.iter().any(|c| c.to_lowercase() == company)
    }
}

/// Status recorded in a progress entry
///
/// Only `solved` carries meaning today; any other value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProgressStatus {
    /// `solved`
    Solved,
    /// Any other status string, kept as written
    Other(String),
}

impl From<String> for ProgressStatus {
    fn from(value: String) -> Self {
        if value == "solved" { ProgressStatus::Solved } else { ProgressStatus::Other(value) }
    }
}

impl From<ProgressStatus> for String {
    fn from(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::Solved => "solved".to_string(),
            ProgressStatus::Other(s) => s,
        }
    }
}

/// A record that a question was worked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Question this entry refers to
    pub question_id: QuestionId,
    /// Recorded status
    pub status: ProgressStatus,
    /// Date of the most recent status change
    pub date: NaiveDate,
}

impl ProgressEntry {
    /// A `solved` entry dated `date`
    pub fn solved(question_id: QuestionId, date: NaiveDate) -> Self {
        Self { question_id, status: ProgressStatus::Solved, date }
    }

    /// Whether this entry marks its question as solved
    pub fn is_solved(&self) -> bool {
        self.status == ProgressStatus::Solved
    }
}

/// The whole persisted document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// Catalog in display order
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Solve log, at most one entry per question
    #[serde(default)]
    pub user_progress: Vec<ProgressEntry>,
}

impl Database {
    /// Find a question by id (first occurrence wins)
    pub fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Ids that appear more than once in the catalog, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<QuestionId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for question in &self.questions {
            if !seen.insert(question.id) && !duplicates.contains(&question.id) {
                duplicates.push(question.id);
            }
        }
        duplicates
    }
}
