use std::sync::Arc;

use chrono::{Days, Duration};
use tracing::{info, warn};

use storage::repository::{SessionStore, TrainingLog};
use tracker_core::model::{SessionDate, SessionError, SessionId, SessionRecord};
use tracker_core::stats::minutes_logged_on;
use tracker_core::streak::DEFAULT_STREAK_LOOKBACK_DAYS;

use crate::Clock;
use crate::dashboard::Dashboard;
use crate::error::TrackerServiceError;

/// Cap on the minutes that can be logged against a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyLimit {
    minutes: u32,
}

impl DailyLimit {
    pub const DEFAULT_MINUTES: u32 = 8 * 60;

    #[must_use]
    pub fn new(minutes: u32) -> Self {
        Self { minutes }
    }

    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl Default for DailyLimit {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINUTES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub daily_limit: DailyLimit,
    pub streak_lookback_days: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            daily_limit: DailyLimit::default(),
            streak_lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
        }
    }
}

/// Logs sessions and derives dashboards from the persisted training log.
///
/// Holds no cached state; every read goes back to the store.
#[derive(Clone)]
pub struct TrackerService {
    clock: Clock,
    sessions: Arc<dyn SessionStore>,
    config: TrackerConfig,
}

impl TrackerService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionStore>) -> Self {
        Self::with_config(clock, sessions, TrackerConfig::default())
    }

    #[must_use]
    pub fn with_config(
        clock: Clock,
        sessions: Arc<dyn SessionStore>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            clock,
            sessions,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Load the cumulative hours and session history.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` on storage failures.
    pub async fn load(&self) -> Result<TrainingLog, TrackerServiceError> {
        Ok(self.sessions.load().await?)
    }

    /// Validate and persist a new session.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Session` for a zero duration,
    /// `FutureDate` for a date after today, `DailyLimitExceeded` if the day
    /// would go over the configured limit, or `Storage` on storage failures.
    pub async fn log_session(
        &self,
        date: SessionDate,
        duration_minutes: u32,
    ) -> Result<SessionRecord, TrackerServiceError> {
        if duration_minutes == 0 {
            return Err(SessionError::ZeroDuration.into());
        }
        if date.day() > self.clock.today() {
            warn!(%date, "rejected session dated in the future");
            return Err(TrackerServiceError::FutureDate { date });
        }

        let log = self.sessions.load().await?;
        let logged = minutes_logged_on(&log.sessions, date.day());
        let limit = self.config.daily_limit.minutes();
        if logged + u64::from(duration_minutes) > u64::from(limit) {
            warn!(%date, logged, requested = duration_minutes, limit, "daily limit exceeded");
            return Err(TrackerServiceError::DailyLimitExceeded {
                logged,
                requested: duration_minutes,
                limit,
            });
        }

        let record = SessionRecord::new(
            SessionId::from_timestamp(self.clock.now()),
            date,
            duration_minutes,
        )?;
        self.sessions.append_session(&record).await?;

        info!(
            session_id = %record.id(),
            %date,
            minutes = duration_minutes,
            "session logged"
        );
        Ok(record)
    }

    /// Parse `raw_date` ("Month D, YYYY" or YYYY-MM-DD) and log a session on it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Date` if the date does not parse, otherwise
    /// see [`TrackerService::log_session`].
    pub async fn log_session_on(
        &self,
        raw_date: &str,
        duration_minutes: u32,
    ) -> Result<SessionRecord, TrackerServiceError> {
        let date = SessionDate::parse(raw_date)?;
        self.log_session(date, duration_minutes).await
    }

    /// Log a session against today's date.
    ///
    /// # Errors
    ///
    /// See [`TrackerService::log_session`].
    pub async fn log_session_today(
        &self,
        duration_minutes: u32,
    ) -> Result<SessionRecord, TrackerServiceError> {
        let today = SessionDate::new(self.clock.today());
        self.log_session(today, duration_minutes).await
    }

    /// Minutes that can still be logged for `date` before hitting the limit.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` on storage failures.
    pub async fn remaining_minutes_on(
        &self,
        date: SessionDate,
    ) -> Result<u64, TrackerServiceError> {
        let log = self.sessions.load().await?;
        let logged = minutes_logged_on(&log.sessions, date.day());
        Ok(u64::from(self.config.daily_limit.minutes()).saturating_sub(logged))
    }

    /// Derive the dashboard for an already loaded log.
    #[must_use]
    pub fn dashboard(&self, log: &TrainingLog) -> Dashboard {
        let now = self.clock.now_local();
        Dashboard::build(log, now, now.date(), self.config.streak_lookback_days)
    }

    /// Load the log and derive the dashboard in one step.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` on storage failures.
    pub async fn load_dashboard(&self) -> Result<Dashboard, TrackerServiceError> {
        let log = self.load().await?;
        Ok(self.dashboard(&log))
    }

    /// Delete all sessions and reset the hour total.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` on storage failures.
    pub async fn clear(&self) -> Result<(), TrackerServiceError> {
        self.sessions.clear().await?;
        info!("training data cleared");
        Ok(())
    }

    /// Replace all data with three sessions on the last three days.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` on storage failures.
    pub async fn seed_demo(&self) -> Result<Vec<SessionRecord>, TrackerServiceError> {
        let now = self.clock.now();
        let today = self.clock.today();

        let mut sessions = Vec::with_capacity(3);
        for (offset, minutes) in [(0_u32, 120_u32), (1, 180), (2, 150)] {
            let day = today
                .checked_sub_days(Days::new(u64::from(offset)))
                .unwrap_or(today);
            let id = SessionId::from_timestamp(now - Duration::seconds(i64::from(offset)));
            sessions.push(SessionRecord::new(id, SessionDate::new(day), minutes)?);
        }

        self.sessions.clear().await?;
        self.sessions.replace_sessions(&sessions).await?;
        info!(count = sessions.len(), "demo data seeded");
        Ok(sessions)
    }
}
