//! Chat command dispatch
//!
//! `ChatBot` classifies each message, runs it against the question store
//! and renders the reply. Messages are handled independently; the bot keeps
//! no conversation state.

pub mod command;
pub mod error;
pub mod reply;

use std::sync::{Mutex, PoisonError};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Database, Difficulty, Question, QuestionId, QuestionStore};
use crate::clock::Clock;
use crate::query::{self, filters};

// Re-exports
pub use command::{Command, ParseResult, Usage, parse_command};
pub use error::{CommandError, Filter};
pub use reply::{LinkStyle, Outcome, Reply, escape_html, render, render_error};

/// Incoming chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Raw user text
    #[serde(default)]
    pub message: String,
}

/// Outgoing chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Rendered reply text
    pub reply: String,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self { reply: reply.text }
    }
}

/// Tunables for reply content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotOptions {
    /// Link rendering for the random-question reply
    pub link_style: LinkStyle,
    /// Number of questions in the interview warm-up
    pub interview_size: usize,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self { link_style: LinkStyle::Plain, interview_size: 5 }
    }
}

/// The chat command interpreter
pub struct ChatBot<S> {
    store: S,
    options: BotOptions,
    clock: Clock,
    /// Serializes load-modify-save so concurrent solves are not lost
    write_lock: Mutex<()>,
}

impl<S: QuestionStore> ChatBot<S> {
    /// Create a bot over `store` with default options
    pub fn new(store: S) -> Self {
        Self::with_options(store, BotOptions::default())
    }

    /// Create a bot with explicit options
    pub fn with_options(store: S, options: BotOptions) -> Self {
        Self { store, options, clock: Clock::System, write_lock: Mutex::new(()) }
    }

    /// Replace the date source used for solve records
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Answer one message
    pub fn respond(&self, message: &str) -> Reply {
        self.respond_with_rng(message, &mut rand::rng())
    }

    /// Answer one message drawing random picks from `rng`
    pub fn respond_with_rng<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Reply {
        match self.handle(message, rng) {
            Ok(outcome) => render(&outcome, self.options.link_style),
            Err(err) => {
                if err.is_unsaved_change() {
                    tracing::error!("Change not persisted: {:?}", err);
                }
                render_error(&err)
            }
        }
    }

    /// Answer a transport-level request
    pub fn answer(&self, request: &ChatRequest) -> ChatResponse {
        self.respond(&request.message).into()
    }

    fn handle<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Result<Outcome, CommandError> {
        let command = match parse_command(message) {
            ParseResult::Ok(command) => command,
            ParseResult::Empty => return Err(CommandError::EmptyInput),
            ParseResult::InvalidArgument(usage) => return Err(CommandError::InvalidArgument(usage)),
            ParseResult::UnknownCommand => {
                tracing::debug!("Unrecognized message: {:?}", message);
                return Ok(Outcome::Unknown);
            }
        };
        tracing::debug!("Classified message as {:?}", command);

        match command {
            Command::Help => Ok(Outcome::Help),
            Command::MarkSolved(id) => self.mark_solved(id),
            Command::RandomQuestion => {
                let db = self.store.load_or_default();
                let q = filters::random_one(&db.questions, rng)?;
                Ok(Outcome::RandomQuestion(q.clone()))
            }
            Command::Company(company) => {
                let db = self.store.load_or_default();
                let questions = owned(filters::by_company(&db, &company));
                if questions.is_empty() {
                    return Err(CommandError::NoMatches(Filter::Company(company)));
                }
                Ok(Outcome::CompanyList { company, questions })
            }
            Command::Topic(topic) => {
                let db = self.store.load_or_default();
                let questions = owned(filters::by_topic(&db, &topic));
                if questions.is_empty() {
                    return Err(CommandError::NoMatches(Filter::Topic(topic)));
                }
                Ok(Outcome::TopicList { topic, questions })
            }
            Command::Difficulty(level) => {
                let db = self.store.load_or_default();
                let questions = owned(filters::by_difficulty(&db, level));
                if questions.is_empty() {
                    return Err(CommandError::NoMatches(Filter::Difficulty(level)));
                }
                Ok(Outcome::DifficultyList { level, questions })
            }
            Command::Progress => {
                let db = self.store.load_or_default();
                Ok(Outcome::Progress(query::summarize(&db)))
            }
            Command::ThreeTier => {
                let db = self.store.load_or_default();
                three_tier(&db, rng).map(Outcome::ThreeTier)
            }
            Command::Interview => {
                let db = self.store.load_or_default();
                if db.questions.is_empty() {
                    return Err(CommandError::EmptyCatalog);
                }
                let picked =
                    filters::random_distinct_subset(&db.questions, self.options.interview_size, rng);
                Ok(Outcome::Interview(picked.into_iter().cloned().collect()))
            }
        }
    }

    fn mark_solved(&self, id: QuestionId) -> Result<Outcome, CommandError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut db =
            self.store.load().map_err(|source| CommandError::StoreUnavailable { id, source })?;
        let question = query::mark_solved(&mut db, id, self.clock.today())?;
        self.store.save(&db).map_err(|source| CommandError::SaveFailed { id, source })?;

        tracing::info!("Marked question #{} as solved", id);
        Ok(Outcome::MarkedSolved(question))
    }
}

fn owned(questions: Vec<&Question>) -> Vec<Question> {
    questions.into_iter().cloned().collect()
}

/// One random question per tier, easiest first
fn three_tier<R: Rng + ?Sized>(db: &Database, rng: &mut R) -> Result<Vec<Question>, CommandError> {
    if db.questions.is_empty() {
        return Err(CommandError::EmptyCatalog);
    }

    Difficulty::ALL
        .into_iter()
        .map(|level| {
            let pool = filters::by_difficulty(db, level);
            filters::random_one(&pool, &mut *rng)
                .map(|q| (*q).clone())
                .map_err(|_| CommandError::EmptyTier(level))
        })
        .collect()
}
