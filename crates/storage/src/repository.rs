use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracker_core::model::{AppSettings, CumulativeHours, SessionRecord};

use crate::training_store::KvTrainingStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Everything the tracker has persisted, loaded in one go.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainingLog {
    pub cumulative_hours: CumulativeHours,
    /// Most recent first.
    pub sessions: Vec<SessionRecord>,
}

/// Minimal string key-value contract the tracker persists through.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Repository contract for the session list and the running hour total.
///
/// Writes are read-modify-write over separate keys; two callers appending at
/// the same time can lose one update.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the cumulative hours and all sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if persisted data is corrupt.
    async fn load(&self) -> Result<TrainingLog, StorageError>;

    /// Prepend a session and add its duration to the running total.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails.
    async fn append_session(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Replace all sessions and recompute the total from them.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails.
    async fn replace_sessions(&self, sessions: &[SessionRecord]) -> Result<(), StorageError>;

    /// Remove all sessions and reset the total to zero.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be read or decoded.
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be stored.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

/// Simple in-memory key-value store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the tracker repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionStore>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    /// Build repositories on top of any key-value backend.
    #[must_use]
    pub fn from_kv(kv: Arc<dyn KeyValueStore>) -> Self {
        let store = KvTrainingStore::new(kv);
        let sessions: Arc<dyn SessionStore> = Arc::new(store.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(store);
        Self { sessions, settings }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_kv(Arc::new(InMemoryKeyValueStore::new()))
    }
}
