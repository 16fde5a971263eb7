use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::settings_service::SettingsService;
use crate::tracker_service::{TrackerConfig, TrackerService};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    tracker: Arc<TrackerService>,
    settings: Arc<SettingsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: TrackerConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, config))
    }

    #[must_use]
    pub fn in_memory(clock: Clock, config: TrackerConfig) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, config)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, config: TrackerConfig) -> Self {
        let tracker = Arc::new(TrackerService::with_config(
            clock,
            Arc::clone(&storage.sessions),
            config,
        ));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));
        Self { tracker, settings }
    }

    #[must_use]
    pub fn tracker(&self) -> Arc<TrackerService> {
        Arc::clone(&self.tracker)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}
