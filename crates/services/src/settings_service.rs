use std::sync::Arc;

use storage::repository::SettingsRepository;
use tracing::info;
use tracker_core::model::AppSettings;

use crate::error::SettingsServiceError;

#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<AppSettings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if persistence fails.
    pub async fn save(&self, settings: AppSettings) -> Result<AppSettings, SettingsServiceError> {
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }

    /// Update only the constrained-view flag.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn set_constrained_view(
        &self,
        enabled: bool,
    ) -> Result<AppSettings, SettingsServiceError> {
        let mut settings = self.load().await?;
        settings.set_constrained_view(enabled);
        info!(enabled, "constrained view updated");
        self.save(settings).await
    }
}
