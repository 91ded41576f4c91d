//! Question catalog and solve log
//!
//! This module defines the persisted dataset and the store contract the
//! chat bot reads from and writes to.

pub mod model;
pub mod store;

// Re-exports
pub use model::{Database, Difficulty, ProgressEntry, ProgressStatus, Question, QuestionId};
pub use store::{JsonFileStore, MemoryStore, QuestionStore, StoreError};
