//! Solve-progress aggregation and updates

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::QueryError;
use crate::catalog::{Database, ProgressEntry, Question, QuestionId};

/// Solved and total counts for one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTally {
    /// Topic label as it first appears in the catalog
    pub topic: String,
    /// Solved questions in this topic
    pub solved: usize,
    /// All questions in this topic
    pub total: usize,
}

/// Progress over the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Number of distinct catalog questions
    pub total: usize,
    /// Distinct catalog questions with a solved entry
    pub solved: usize,
    /// `total - solved`
    pub pending: usize,
    /// Per-topic breakdown in first-encounter order
    pub per_topic: Vec<TopicTally>,
}

impl ProgressSummary {
    /// Every question in a non-empty catalog is solved
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.solved == self.total
    }
}

/// Aggregate the solve log against the catalog
///
/// Entries pointing at ids missing from the catalog are ignored, so
/// `solved + pending == total` always holds. A duplicated catalog id counts
/// once, under its first occurrence.
pub fn summarize(db: &Database) -> ProgressSummary {
    let solved_ids: HashSet<QuestionId> =
        db.user_progress.iter().filter(|p| p.is_solved()).map(|p| p.question_id).collect();

    let mut per_topic: Vec<TopicTally> = Vec::new();
    let mut topic_index: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<QuestionId> = HashSet::new();
    let mut total = 0;
    let mut solved = 0;

    for question in db.questions.iter().filter(|q| seen.insert(q.id)) {
        let idx = *topic_index.entry(question.topic.as_str()).or_insert_with(|| {
            per_topic.push(TopicTally { topic: question.topic.clone(), solved: 0, total: 0 });
            per_topic.len() - 1
        });

        let tally = &mut per_topic[idx];
        tally.total += 1;
        total += 1;
        if solved_ids.contains(&question.id) {
            tally.solved += 1;
            solved += 1;
        }
    }

    ProgressSummary { total, solved, pending: total - solved, per_topic }
}

/// Record `id` as solved on `today`
///
/// Any previous entry for `id` is replaced, so repeated calls leave exactly
/// one entry and only move its date.
///
/// # Errors
///
/// Returns `QueryError::QuestionNotFound` if `id` is not in the catalog; the
/// solve log is left untouched in that case.
pub fn mark_solved(
    db: &mut Database,
    id: QuestionId,
    today: NaiveDate,
) -> Result<Question, QueryError> {
    let question = db.find(id).cloned().ok_or(QueryError::QuestionNotFound(id))?;

    db.user_progress.retain(|p| p.question_id != id);
    db.user_progress.push(ProgressEntry::solved(id, today));

    Ok(question)
}
