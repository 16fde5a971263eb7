use serde::Serialize;
use thiserror::Error;

use super::SessionRecord;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("cumulative hours must be a finite, non-negative number (got {value})")]
    InvalidHours { value: f64 },
}

/// Total hours ever logged. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct CumulativeHours(f64);

impl CumulativeHours {
    pub const ZERO: Self = Self(0.0);

    /// # Errors
    ///
    /// Returns `ProgressError::InvalidHours` for negative, NaN, or infinite input.
    pub fn new(value: f64) -> Result<Self, ProgressError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ProgressError::InvalidHours { value });
        }
        Ok(Self(value))
    }

    /// Running total over a list of sessions.
    #[must_use]
    pub fn from_sessions(sessions: &[SessionRecord]) -> Self {
        sessions
            .iter()
            .fold(Self::ZERO, |total, s| Self(total.0 + s.hours()))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn add_minutes(self, minutes: u32) -> Self {
        Self(self.0 + f64::from(minutes) / 60.0)
    }
}
