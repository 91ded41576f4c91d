//! Failure outcomes of a chat command
//!
//! None of these reach the transport: each one renders to a reply.

use thiserror::Error;

use super::command::Usage;
use crate::catalog::{Difficulty, QuestionId, StoreError};
use crate::query::QueryError;

/// Which filter came back empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `company <name>`, lower-cased
    Company(String),
    /// `topic <name>`
    Topic(String),
    /// `easy`, `medium` or `hard`
    Difficulty(Difficulty),
}

/// Errors a command can end in
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// Blank message
    #[error("Please type something")]
    EmptyInput,

    /// Recognized command with a bad or missing argument
    #[error("{0}")]
    InvalidArgument(Usage),

    /// `mark solved` for an id not in the catalog
    #[error("No question with id #{0} found.")]
    QuestionNotFound(QuestionId),

    /// A filter matched nothing
    #[error("{}", no_matches_text(.0))]
    NoMatches(Filter),

    /// The catalog has no questions
    #[error("No questions found in the database.")]
    EmptyCatalog,

    /// One tier is empty, so no 3-question set
    #[error("There are no {0} questions in the database yet, so I can't build a 3-question set.")]
    EmptyTier(Difficulty),

    /// The solve was applied but could not be saved
    #[error(
        "Sorry, I couldn't save your progress right now. Question #{id} was NOT marked as solved, please try again."
    )]
    SaveFailed {
        id: QuestionId,
        #[source]
        source: StoreError,
    },

    /// The dataset could not be loaded for a solve
    #[error(
        "Sorry, I couldn't reach the question database. Question #{id} was NOT marked as solved, please try again."
    )]
    StoreUnavailable {
        id: QuestionId,
        #[source]
        source: StoreError,
    },
}

fn no_matches_text(filter: &Filter) -> String {
    match filter {
        Filter::Company(name) => format!("No questions found for company: {name}"),
        Filter::Topic(topic) => format!("No questions found for topic: {topic}"),
        Filter::Difficulty(level) => format!("No {level} questions found."),
    }
}

impl From<QueryError> for CommandError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::QuestionNotFound(id) => CommandError::QuestionNotFound(id),
            QueryError::EmptyPool => CommandError::EmptyCatalog,
        }
    }
}

impl CommandError {
    /// Whether a requested change was not persisted
    pub fn is_unsaved_change(&self) -> bool {
        matches!(self, CommandError::SaveFailed { .. } | CommandError::StoreUnavailable { .. })
    }
}
