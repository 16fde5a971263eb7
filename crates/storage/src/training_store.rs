use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracker_core::model::{
    AppSettings, CumulativeHours, SessionDate, SessionId, SessionRecord,
};

use crate::repository::{
    KeyValueStore, SessionStore, SettingsRepository, StorageError, TrainingLog,
};

/// Storage keys, shared with data written by earlier app versions.
pub mod keys {
    pub const TOTAL_HOURS: &str = "qep_total_hours";
    pub const SESSIONS: &str = "qep_sessions";
    pub const SETTINGS: &str = "qep_settings";
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Persisted JSON shape for a session.
///
/// Mirrors the domain `SessionRecord` so the stored array stays readable by
/// earlier versions, which wrote `duration` in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub date: String,
    pub duration: u32,
}

impl SessionRow {
    #[must_use]
    pub fn from_record(record: &SessionRecord) -> Self {
        Self {
            id: record.id().as_str().to_owned(),
            date: record.date().to_string(),
            duration: record.duration_minutes(),
        }
    }

    /// Convert the row back into a domain `SessionRecord`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the id, date, or duration is invalid.
    pub fn into_record(self) -> Result<SessionRecord, StorageError> {
        let id = SessionId::from_persisted(self.id).map_err(ser)?;
        let date = SessionDate::parse(&self.date).map_err(ser)?;
        SessionRecord::new(id, date, self.duration).map_err(ser)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsRow {
    #[serde(default)]
    constrained_view: bool,
}

/// Session and settings repositories over a string key-value store.
///
/// Sessions live in one JSON array, the hour total in a separate decimal
/// string, matching the layout the mobile app used.
#[derive(Clone)]
pub struct KvTrainingStore {
    kv: Arc<dyn KeyValueStore>,
}

impl KvTrainingStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    async fn load_rows(&self) -> Result<Vec<SessionRow>, StorageError> {
        match self.kv.get(keys::SESSIONS).await? {
            Some(json) => serde_json::from_str(&json).map_err(ser),
            None => Ok(Vec::new()),
        }
    }

    async fn save_rows(&self, rows: &[SessionRow]) -> Result<(), StorageError> {
        let json = serde_json::to_string(rows).map_err(ser)?;
        self.kv.set(keys::SESSIONS, &json).await
    }

    async fn load_hours(&self) -> Result<CumulativeHours, StorageError> {
        let Some(raw) = self.kv.get(keys::TOTAL_HOURS).await? else {
            return Ok(CumulativeHours::ZERO);
        };
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| StorageError::Serialization(format!("invalid total hours: {raw}")))?;
        CumulativeHours::new(value).map_err(ser)
    }

    async fn save_hours(&self, hours: CumulativeHours) -> Result<(), StorageError> {
        self.kv
            .set(keys::TOTAL_HOURS, &hours.value().to_string())
            .await
    }
}

#[async_trait]
impl SessionStore for KvTrainingStore {
    async fn load(&self) -> Result<TrainingLog, StorageError> {
        let cumulative_hours = self.load_hours().await?;
        let sessions = self
            .load_rows()
            .await?
            .into_iter()
            .map(SessionRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TrainingLog {
            cumulative_hours,
            sessions,
        })
    }

    async fn append_session(&self, record: &SessionRecord) -> Result<(), StorageError> {
        // Both keys must parse before either is written.
        let mut rows = self.load_rows().await?;
        let total = self
            .load_hours()
            .await?
            .add_minutes(record.duration_minutes());

        rows.insert(0, SessionRow::from_record(record));
        self.save_rows(&rows).await?;
        self.save_hours(total).await?;

        debug!(
            session_id = %record.id(),
            minutes = record.duration_minutes(),
            total_hours = total.value(),
            "appended session"
        );
        Ok(())
    }

    async fn replace_sessions(&self, sessions: &[SessionRecord]) -> Result<(), StorageError> {
        let rows: Vec<SessionRow> = sessions.iter().map(SessionRow::from_record).collect();
        self.save_rows(&rows).await?;
        let total = CumulativeHours::from_sessions(sessions);
        self.save_hours(total).await?;
        debug!(count = rows.len(), total_hours = total.value(), "replaced sessions");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::TOTAL_HOURS).await?;
        self.kv.remove(keys::SESSIONS).await?;
        debug!("cleared training data");
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for KvTrainingStore {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let Some(json) = self.kv.get(keys::SETTINGS).await? else {
            return Ok(None);
        };
        let row: SettingsRow = serde_json::from_str(&json).map_err(ser)?;
        Ok(Some(AppSettings::new(row.constrained_view)))
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let row = SettingsRow {
            constrained_view: settings.constrained_view(),
        };
        let json = serde_json::to_string(&row).map_err(ser)?;
        self.kv.set(keys::SETTINGS, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryKeyValueStore;
    use tracker_core::time::fixed_now;

    fn record(id: &str, date: &str, minutes: u32) -> SessionRecord {
        SessionRecord::new(
            SessionId::from_persisted(id).unwrap(),
            SessionDate::parse(date).unwrap(),
            minutes,
        )
        .unwrap()
    }

    fn store() -> (KvTrainingStore, Arc<InMemoryKeyValueStore>) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        (KvTrainingStore::new(kv.clone()), kv)
    }

    #[tokio::test]
    async fn append_prepends_and_accumulates_hours() {
        let (store, _) = store();
        store
            .append_session(&record("1", "October 15, 2026", 90))
            .await
            .unwrap();
        store
            .append_session(&record("2", "October 16, 2026", 30))
            .await
            .unwrap();

        let log = store.load().await.unwrap();
        assert!((log.cumulative_hours.value() - 2.0).abs() < 1e-9);
        let ids: Vec<_> = log.sessions.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn writes_the_legacy_json_layout() {
        let (store, kv) = store();
        let id = SessionId::from_timestamp(fixed_now());
        let session =
            SessionRecord::new(id, SessionDate::parse("November 14, 2023").unwrap(), 120).unwrap();
        store.append_session(&session).await.unwrap();

        let raw = kv.get(keys::SESSIONS).await.unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"1700000000000","date":"November 14, 2023","duration":120}]"#
        );
        assert_eq!(kv.get(keys::TOTAL_HOURS).await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn reads_data_written_by_the_mobile_app() {
        let (store, kv) = store();
        kv.set(keys::TOTAL_HOURS, "7.5").await.unwrap();
        kv.set(
            keys::SESSIONS,
            r#"[{"id":"1","date":"March 3, 2025","duration":450}]"#,
        )
        .await
        .unwrap();

        let log = store.load().await.unwrap();
        assert!((log.cumulative_hours.value() - 7.5).abs() < 1e-9);
        assert_eq!(log.sessions[0].date().to_string(), "March 3, 2025");
    }

    #[tokio::test]
    async fn corrupt_values_surface_serialization_errors() {
        let (store, kv) = store();
        kv.set(keys::TOTAL_HOURS, "lots").await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));

        kv.set(keys::TOTAL_HOURS, "-3").await.unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));

        kv.set(keys::TOTAL_HOURS, "1").await.unwrap();
        kv.set(
            keys::SESSIONS,
            r#"[{"id":"1","date":"not a date","duration":60}]"#,
        )
        .await
        .unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn failed_append_leaves_sessions_untouched() {
        let (store, kv) = store();
        kv.set(keys::TOTAL_HOURS, "garbage").await.unwrap();

        let err = store
            .append_session(&record("x", "October 17, 2026", 60))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert_eq!(kv.get(keys::SESSIONS).await.unwrap(), None);
        assert_eq!(
            kv.get(keys::TOTAL_HOURS).await.unwrap().as_deref(),
            Some("garbage")
        );
    }

    #[tokio::test]
    async fn replace_and_clear_reset_totals() {
        let (store, _) = store();
        let sessions = vec![
            record("a", "October 17, 2026", 120),
            record("b", "October 16, 2026", 180),
        ];
        store.replace_sessions(&sessions).await.unwrap();
        let log = store.load().await.unwrap();
        assert_eq!(log.sessions, sessions);
        assert!((log.cumulative_hours.value() - 5.0).abs() < 1e-9);

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), TrainingLog::default());
    }

    #[tokio::test]
    async fn settings_round_trip_and_survive_clear() {
        let (store, kv) = store();
        store.save_settings(&AppSettings::new(true)).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(
            store.get_settings().await.unwrap(),
            Some(AppSettings::new(true))
        );
        assert_eq!(
            kv.get(keys::SETTINGS).await.unwrap().as_deref(),
            Some(r#"{"constrainedView":true}"#)
        );
    }
}
