//! Progress store and its persistence
//!
//! The store maps card ids to review state. It is persisted as a single
//! JSON blob through a [`ProgressBackend`]:
//! ```json
//! { "qa_1x2y3z": { "intervalMs": 86400000, "easeFactor": 2.5, "repetitions": 1, "dueAt": 1700086400000 } }
//! ```
//! A missing or unreadable blob loads as an empty store. Write failures are
//! returned to the caller.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use super::algorithm::{calculate_next_review, Grade};
use super::models::ReviewState;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Progress backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, ProgressError>;

/// Review state per card id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    states: HashMap<String, ReviewState>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored state, if the card was ever reviewed
    pub fn get(&self, card_id: &str) -> Option<&ReviewState> {
        self.states.get(card_id)
    }

    /// Stored state, or the default state of a never-reviewed card
    pub fn state(&self, card_id: &str) -> ReviewState {
        self.get(card_id).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, card_id: impl Into<String>, state: ReviewState) {
        self.states.insert(card_id.into(), state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// A new store with `card_id` graded; `self` is left untouched
    pub fn review(&self, card_id: &str, grade: Grade, now: i64) -> ProgressStore {
        let mut next = self.clone();
        next.apply_review(card_id, grade, now);
        next
    }

    /// Grade `card_id` in place and return its new state
    pub fn apply_review(&mut self, card_id: &str, grade: Grade, now: i64) -> ReviewState {
        let next = calculate_next_review(&self.state(card_id), grade, now);
        self.insert(card_id, next);
        next
    }

    /// Parse a persisted blob; absent or malformed input gives an empty store
    pub fn from_blob(blob: Option<&str>) -> Self {
        let Some(raw) = blob.filter(|raw| !raw.trim().is_empty()) else {
            return Self::new();
        };

        match serde_json::from_str(raw) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Ignoring malformed progress data: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Key-value persistence for the progress blob
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// Current blob, `None` if nothing was saved yet
    async fn load(&self) -> Result<Option<String>>;

    /// Replace the stored blob
    async fn save(&self, blob: String) -> Result<()>;
}

/// Load the store from a backend, falling back to an empty store
pub async fn load_progress(backend: &dyn ProgressBackend) -> ProgressStore {
    match backend.load().await {
        Ok(blob) => ProgressStore::from_blob(blob.as_deref()),
        Err(e) => {
            log::warn!("Failed to read progress, starting empty: {}", e);
            ProgressStore::new()
        }
    }
}

/// Write the whole store to a backend
pub async fn save_progress(backend: &dyn ProgressBackend, store: &ProgressStore) -> Result<()> {
    backend.save(store.to_blob()?).await
}

/// Progress blob kept in a JSON file
pub struct FileProgressBackend {
    path: PathBuf,
}

impl FileProgressBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ProgressBackend for FileProgressBackend {
    async fn load(&self) -> Result<Option<String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path).await?))
    }

    async fn save(&self, blob: String) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, blob).await?;
        Ok(())
    }
}

/// Progress blob kept in memory, for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryProgressBackend {
    blob: Mutex<Option<String>>,
}

impl MemoryProgressBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|b| b.clone())
    }
}

#[async_trait]
impl ProgressBackend for MemoryProgressBackend {
    async fn load(&self) -> Result<Option<String>> {
        let blob = self
            .blob
            .lock()
            .map_err(|e| ProgressError::Backend(e.to_string()))?;
        Ok(blob.clone())
    }

    async fn save(&self, blob: String) -> Result<()> {
        let mut current = self
            .blob
            .lock()
            .map_err(|e| ProgressError::Backend(e.to_string()))?;
        *current = Some(blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_store() -> ProgressStore {
        let mut store = ProgressStore::new();
        store.insert(
            "qa_abc",
            ReviewState { interval_ms: 86_400_000, ease_factor: 2.6, repetitions: 1, due_at: 1_700_086_400_000 },
        );
        store.insert(
            "cloze_xyz",
            ReviewState { interval_ms: 600_000, ease_factor: 1.3, repetitions: 0, due_at: 42 },
        );
        store
    }

    #[test]
    fn test_blob_round_trip() {
        let store = sample_store();
        let blob = store.to_blob().unwrap();
        assert_eq!(ProgressStore::from_blob(Some(&blob)), store);
    }

    #[test]
    fn test_blob_uses_camel_case_fields() {
        let blob = sample_store().to_blob().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["qa_abc"]["intervalMs"], 86_400_000);
        assert_eq!(value["qa_abc"]["dueAt"], 1_700_086_400_000i64);
    }

    #[test]
    fn test_bad_blob_gives_empty_store() {
        assert!(ProgressStore::from_blob(None).is_empty());
        assert!(ProgressStore::from_blob(Some("")).is_empty());
        assert!(ProgressStore::from_blob(Some("{not json")).is_empty());
        assert!(ProgressStore::from_blob(Some("[1, 2, 3]")).is_empty());
    }

    #[test]
    fn test_review_is_pure() {
        let store = ProgressStore::new();
        let next = store.review("qa_1", Grade::Good, 1_000);

        assert!(store.is_empty());
        assert_eq!(next.state("qa_1").repetitions, 1);
        assert_eq!(next.state("qa_1").due_at, 1_000 + 86_400_000);
    }

    #[test]
    fn test_unknown_card_gets_default_state() {
        assert_eq!(sample_store().state("missing"), ReviewState::default());
    }

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = MemoryProgressBackend::new();
        assert!(load_progress(&backend).await.is_empty());

        save_progress(&backend, &sample_store()).await.unwrap();

        assert_eq!(load_progress(&backend).await, sample_store());
    }

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileProgressBackend::new(temp_dir.path().join("nested/progress.json"));

        assert!(backend.load().await.unwrap().is_none());

        save_progress(&backend, &sample_store()).await.unwrap();

        assert_eq!(load_progress(&backend).await, sample_store());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = load_progress(&FileProgressBackend::new(path)).await;

        assert!(store.is_empty());
    }
}
