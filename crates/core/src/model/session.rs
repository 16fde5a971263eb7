use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Display and storage format for session dates, e.g. "October 17, 2026".
const DISPLAY_FORMAT: &str = "%B %-d, %Y";
const PARSE_FORMATS: [&str; 3] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateError {
    #[error("invalid date: {raw:?}")]
    Invalid { raw: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session duration must be greater than zero minutes")]
    ZeroDuration,

    #[error("session id must not be empty")]
    InvalidId,
}

/// Unique identifier for a logged session.
///
/// New ids are the creation timestamp in milliseconds since the epoch.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Rehydrate an id read back from storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidId` if the id is blank.
    pub fn from_persisted(raw: impl Into<String>) -> Result<Self, SessionError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionError::InvalidId);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar day a session is attributed to. Carries no time-of-day.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionDate(NaiveDate);

impl SessionDate {
    #[must_use]
    pub fn new(day: NaiveDate) -> Self {
        Self(day)
    }

    /// Parse "Month D, YYYY" (full or abbreviated month) or ISO "YYYY-MM-DD".
    ///
    /// # Errors
    ///
    /// Returns `DateError::Invalid` when none of the accepted formats match.
    pub fn parse(raw: &str) -> Result<Self, DateError> {
        let trimmed = raw.trim();
        PARSE_FORMATS
            .iter()
            .find_map(|pattern| NaiveDate::parse_from_str(trimmed, pattern).ok())
            .map(Self)
            .ok_or_else(|| DateError::Invalid {
                raw: raw.to_owned(),
            })
    }

    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for SessionDate {
    fn from(day: NaiveDate) -> Self {
        Self(day)
    }
}

impl fmt::Debug for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionDate({})", self.0)
    }
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

/// A single logged training session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    id: SessionId,
    date: SessionDate,
    duration_minutes: u32,
}

impl SessionRecord {
    /// # Errors
    ///
    /// Returns `SessionError::ZeroDuration` if `duration_minutes` is zero.
    pub fn new(
        id: SessionId,
        date: SessionDate,
        duration_minutes: u32,
    ) -> Result<Self, SessionError> {
        if duration_minutes == 0 {
            return Err(SessionError::ZeroDuration);
        }
        Ok(Self {
            id,
            date,
            duration_minutes,
        })
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn date(&self) -> SessionDate {
        self.date
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn hours(&self) -> f64 {
        f64::from(self.duration_minutes) / 60.0
    }
}
