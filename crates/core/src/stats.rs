use chrono::NaiveDate;
use serde::Serialize;

use crate::model::SessionRecord;

/// Aggregate figures over the full session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub sessions_logged: usize,
    pub total_minutes: u64,
    /// Rounded mean session length, 0 when nothing is logged.
    pub average_session_minutes: u64,
}

impl SessionStats {
    #[must_use]
    pub fn from_sessions(sessions: &[SessionRecord]) -> Self {
        let sessions_logged = sessions.len();
        let total_minutes: u64 = sessions
            .iter()
            .map(|s| u64::from(s.duration_minutes()))
            .sum();
        let count = sessions_logged as u64;
        let average_session_minutes = if count == 0 {
            0
        } else {
            // Round half up.
            (total_minutes + count / 2) / count
        };
        Self {
            sessions_logged,
            total_minutes,
            average_session_minutes,
        }
    }
}

/// Minutes already logged against `day`.
#[must_use]
pub fn minutes_logged_on(sessions: &[SessionRecord], day: NaiveDate) -> u64 {
    sessions
        .iter()
        .filter(|s| s.date().day() == day)
        .map(|s| u64::from(s.duration_minutes()))
        .sum()
}

/// "45m", "2h", "2h 5m".
#[must_use]
pub fn format_duration_compact(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// "45 min", "2 hr", "2 hr 5 min".
#[must_use]
pub fn format_duration_long(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} hr"),
        (h, m) => format!("{h} hr {m} min"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SessionDate, SessionId};

    fn session(id: &str, date: &str, minutes: u32) -> SessionRecord {
        SessionRecord::new(
            SessionId::from_persisted(id).unwrap(),
            SessionDate::parse(date).unwrap(),
            minutes,
        )
        .unwrap()
    }

    #[test]
    fn empty_history_has_zero_average() {
        assert_eq!(SessionStats::from_sessions(&[]), SessionStats::default());
    }

    #[test]
    fn averages_round_to_nearest_minute() {
        let sessions = vec![
            session("a", "October 17, 2026", 120),
            session("b", "October 16, 2026", 180),
            session("c", "October 15, 2026", 151),
        ];
        let stats = SessionStats::from_sessions(&sessions);
        assert_eq!(stats.sessions_logged, 3);
        assert_eq!(stats.total_minutes, 451);
        assert_eq!(stats.average_session_minutes, 150);
    }

    #[test]
    fn sums_minutes_for_one_day() {
        let sessions = vec![
            session("a", "October 17, 2026", 120),
            session("b", "October 17, 2026", 30),
            session("c", "October 16, 2026", 60),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(minutes_logged_on(&sessions, day), 150);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration_compact(45), "45m");
        assert_eq!(format_duration_compact(120), "2h");
        assert_eq!(format_duration_compact(125), "2h 5m");
        assert_eq!(format_duration_long(45), "45 min");
        assert_eq!(format_duration_long(120), "2 hr");
        assert_eq!(format_duration_long(125), "2 hr 5 min");
    }
}
