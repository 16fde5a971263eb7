//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use tracker_core::model::{DateError, SessionDate, SessionError};

/// Errors emitted by `TrackerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Date(#[from] DateError),
    #[error("cannot log a session for a future date ({date})")]
    FutureDate { date: SessionDate },
    #[error(
        "daily limit exceeded: {logged} min already logged, {requested} min requested, limit is {limit} min"
    )]
    DailyLimitExceeded {
        logged: u64,
        requested: u32,
        limit: u32,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
