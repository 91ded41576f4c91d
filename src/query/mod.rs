//! Queries and updates over the dataset
//!
//! Filters select catalog subsets; the progress tracker aggregates and
//! updates the solve log.

pub mod filters;
pub mod progress;

use thiserror::Error;

use crate::catalog::QuestionId;

/// Errors produced by catalog queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The id does not belong to any catalog question
    #[error("question #{0} not found")]
    QuestionNotFound(QuestionId),

    /// A random pick was requested from an empty list
    #[error("nothing to pick from")]
    EmptyPool,
}

// Re-exports
pub use filters::{by_company, by_difficulty, by_topic, random_distinct_subset, random_one};
pub use progress::{ProgressSummary, TopicTally, mark_solved, summarize};
