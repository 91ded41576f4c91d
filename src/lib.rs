//! prepbot - a chat-style tracker for placement-prep practice questions
//!
//! Messages such as `company amazon` or `mark solved 3` are classified into
//! commands, answered from a JSON question catalog, and solve progress is
//! written back to the same document.

pub mod bot;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod query;

pub use bot::{ChatBot, ChatRequest, ChatResponse, Reply};
pub use catalog::{Database, JsonFileStore, QuestionStore};
pub use config::Config;
