//! Dataset persistence
//!
//! The bot only needs a load/replace and save contract; `JsonFileStore` is
//! the on-disk implementation and `MemoryStore` backs tests.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use super::model::Database;

/// Errors raised by a store backend. Every variant means the store is
/// unavailable for this request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The document could not be read
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    /// The document is not a valid dataset
    #[error("failed to parse {path:?}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    /// The dataset could not be encoded
    #[error("failed to serialize database: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document could not be replaced
    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    /// The backend refused the request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save contract for the dataset.
pub trait QuestionStore: Send + Sync {
    /// Load the full dataset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot supply data.
    fn load(&self) -> Result<Database, StoreError>;

    /// Replace the persisted dataset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend rejects the write. The previously
    /// persisted dataset must be left intact in that case.
    fn save(&self, db: &Database) -> Result<(), StoreError>;

    /// Load the dataset, degrading to an empty one on failure.
    fn load_or_default(&self) -> Database {
        match self.load() {
            Ok(db) => db,
            Err(e) => {
                tracing::warn!("Question store unavailable, using empty dataset: {}", e);
                Database::default()
            }
        }
    }
}

/// Dataset stored as a pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the document, where staging files are created
    fn dir(&self) -> &Path {
        self.path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."))
    }
}

impl QuestionStore for JsonFileStore {
    fn load(&self) -> Result<Database, StoreError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;
        let db: Database = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;

        let duplicates = db.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!("Duplicate question ids in {:?}: {:?}", self.path, duplicates);
        }

        Ok(db)
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        let dir = self.dir();
        fs::create_dir_all(dir)
            .map_err(|source| StoreError::Write { path: dir.to_path_buf(), source })?;

        let contents = serde_json::to_string_pretty(db).map_err(StoreError::Serialize)?;

        // Unique staging file per save; removed on drop if the rename fails.
        let mut staged = tempfile::NamedTempFile::new_in(dir)
            .map_err(|source| StoreError::Write { path: dir.to_path_buf(), source })?;
        staged
            .write_all(contents.as_bytes())
            .map_err(|source| StoreError::Write { path: staged.path().to_path_buf(), source })?;
        staged
            .persist(&self.path)
            .map_err(|e| StoreError::Write { path: self.path.clone(), source: e.error })?;

        Ok(())
    }
}

/// In-memory store with switchable failures, for tests and prototyping
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: Mutex<Database>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Create a store holding `db`
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db), ..Default::default() }
    }

    /// Make every subsequent `load` fail (or succeed again)
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `save` fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of `load` calls so far, failed ones included
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the currently stored dataset
    pub fn snapshot(&self) -> Database {
        self.db.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl QuestionStore for MemoryStore {
    fn load(&self) -> Result<Database, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("load disabled".into()));
        }
        let guard = self.db.lock().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("save disabled".into()));
        }
        let mut guard = self.db.lock().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        *guard = db.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::catalog::model::{Difficulty, ProgressEntry, Question, QuestionId};

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn sample_db() -> Database {
        Database {
            questions: vec![Question {
                id: QuestionId::new(1),
                title: "Two Sum".into(),
                topic: "Array".into(),
                difficulty: Difficulty::Easy,
                companies: vec!["Amazon".into()],
                link: "http://x".into(),
            }],
            user_progress: vec![ProgressEntry::solved(
                QuestionId::new(1),
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            )],
        }
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        assert!(matches!(store.load(), Err(StoreError::Read { .. })));
        assert_eq!(store.load_or_default(), Database::default());
    }

    #[test]
    fn corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);

        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
        assert_eq!(store.load_or_default(), Database::default());
    }

    #[test]
    fn save_then_load_preserves_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data.json"));

        store.save(&sample_db()).unwrap();
        assert_eq!(store.load().unwrap(), sample_db());
        assert_eq!(entries(store.dir()), vec!["data.json".to_string()]);
    }

    #[test]
    fn saved_document_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonFileStore::new(&path);

        store.save(&sample_db()).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"userProgress\""));
        assert!(raw.contains("\"questionId\": 1"));
        assert!(raw.contains("\"date\": \"2024-03-09\""));
        assert!(raw.contains("\"difficulty\": \"Easy\""));
    }

    #[test]
    fn failed_save_leaves_target_and_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        // A non-empty directory at the target makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let store = JsonFileStore::new(&path);

        let result = store.save(&sample_db());

        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "x");
        assert_eq!(entries(dir.path()), vec!["data.json".to_string()]);
    }

    #[test]
    fn concurrent_saves_each_land_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        std::thread::scope(|s| {
            for _ in 0..8 {
                let path = &path;
                s.spawn(move || {
                    let store = JsonFileStore::new(path);
                    for _ in 0..10 {
                        store.save(&sample_db()).unwrap();
                    }
                });
            }
        });

        assert_eq!(JsonFileStore::new(&path).load().unwrap(), sample_db());
        assert_eq!(entries(dir.path()), vec!["data.json".to_string()]);
    }

    #[test]
    fn memory_store_round_trips_and_counts() {
        let store = MemoryStore::new(Database::default());
        store.save(&sample_db()).unwrap();

        assert_eq!(store.load().unwrap(), sample_db());
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn memory_store_failures_can_be_toggled() {
        let store = MemoryStore::new(sample_db());

        store.set_fail_loads(true);
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), Database::default());

        store.set_fail_saves(true);
        assert!(store.save(&Database::default()).is_err());
        assert_eq!(store.snapshot(), sample_db());

        store.set_fail_loads(false);
        assert_eq!(store.load().unwrap(), sample_db());
    }
}
