//! Day streaks and "last trained" labels computed from session history.
//!
//! Neither function trusts the order of the session list.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::model::SessionRecord;

/// How many days back a streak is counted before it stops.
pub const DEFAULT_STREAK_LOOKBACK_DAYS: u32 = 30;

/// Consecutive calendar days ending at `today` with at least one session.
///
/// The walk is capped at `max_lookback_days`, so the result never exceeds it.
#[must_use]
pub fn compute_streak(sessions: &[SessionRecord], today: NaiveDate, max_lookback_days: u32) -> u32 {
    if sessions.is_empty() {
        return 0;
    }

    let trained: HashSet<NaiveDate> = sessions.iter().map(|s| s.date().day()).collect();

    let mut streak = 0;
    let mut day = Some(today);
    while streak < max_lookback_days {
        match day {
            Some(d) if trained.contains(&d) => {
                streak += 1;
                day = d.checked_sub_days(Days::new(1));
            }
            _ => break,
        }
    }
    streak
}

#[must_use]
pub fn format_streak(days: u32) -> String {
    format!("{days} day streak")
}

/// Coarse age of the most recent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LastSession {
    Never,
    JustNow,
    HoursAgo(u32),
    DaysAgo(u32),
}

impl fmt::Display for LastSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastSession::Never => f.write_str("Never"),
            LastSession::JustNow => f.write_str("just now"),
            LastSession::HoursAgo(n) => write!(f, "{n}h ago"),
            LastSession::DaysAgo(n) => write!(f, "{n}d ago"),
        }
    }
}

/// Time elapsed since the latest session day began, bucketed for display.
///
/// Sessions carry no time-of-day, so the latest session counts from midnight
/// of its date.
#[must_use]
pub fn time_since_last_session(sessions: &[SessionRecord], now: NaiveDateTime) -> LastSession {
    let Some(latest) = sessions.iter().map(|s| s.date().day()).max() else {
        return LastSession::Never;
    };

    let started = latest.and_time(NaiveTime::MIN);
    let hours = (now - started).num_hours();

    if hours < 1 {
        return LastSession::JustNow;
    }
    let hours = u32::try_from(hours).unwrap_or(u32::MAX);
    if hours < 24 {
        LastSession::HoursAgo(hours)
    } else {
        LastSession::DaysAgo(hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SessionDate, SessionId};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn session_on(day: NaiveDate, n: usize) -> SessionRecord {
        SessionRecord::new(
            SessionId::from_persisted(format!("s{n}")).unwrap(),
            SessionDate::new(day),
            45,
        )
        .unwrap()
    }

    fn days_back(offsets: &[u64]) -> Vec<SessionRecord> {
        offsets
            .iter()
            .enumerate()
            .map(|(n, off)| session_on(today() - Days::new(*off), n))
            .collect()
    }

    #[test]
    fn no_sessions_means_no_streak() {
        assert_eq!(compute_streak(&[], today(), DEFAULT_STREAK_LOOKBACK_DAYS), 0);
        assert_eq!(format_streak(0), "0 day streak");
    }

    #[test]
    fn counts_consecutive_days_until_the_first_gap() {
        let sessions = days_back(&[0, 1, 2, 4, 5]);
        assert_eq!(compute_streak(&sessions, today(), DEFAULT_STREAK_LOOKBACK_DAYS), 3);
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let sessions = days_back(&[2, 0, 1, 0, 1]);
        assert_eq!(compute_streak(&sessions, today(), DEFAULT_STREAK_LOOKBACK_DAYS), 3);
    }

    #[test]
    fn no_session_today_breaks_the_streak() {
        let sessions = days_back(&[1, 2, 3]);
        assert_eq!(compute_streak(&sessions, today(), DEFAULT_STREAK_LOOKBACK_DAYS), 0);
    }

    #[test]
    fn streak_is_capped_by_lookback() {
        let offsets: Vec<u64> = (0..35).collect();
        let sessions = days_back(&offsets);
        assert_eq!(compute_streak(&sessions, today(), DEFAULT_STREAK_LOOKBACK_DAYS), 30);
        assert_eq!(compute_streak(&sessions, today(), 7), 7);
    }

    #[test]
    fn last_session_buckets() {
        let sessions = days_back(&[0]);
        let midnight = today().and_time(NaiveTime::MIN);

        let at = |d: Duration| time_since_last_session(&sessions, midnight + d);
        assert_eq!(at(Duration::minutes(30)), LastSession::JustNow);
        assert_eq!(at(Duration::hours(1)), LastSession::HoursAgo(1));
        assert_eq!(at(Duration::hours(5)), LastSession::HoursAgo(5));
        assert_eq!(at(Duration::hours(50)), LastSession::DaysAgo(2));

        assert_eq!(at(Duration::minutes(30)).to_string(), "just now");
        assert_eq!(at(Duration::hours(1)).to_string(), "1h ago");
        assert_eq!(at(Duration::hours(5)).to_string(), "5h ago");
        assert_eq!(at(Duration::hours(50)).to_string(), "2d ago");
    }

    #[test]
    fn last_session_uses_the_latest_date_regardless_of_order() {
        let sessions = days_back(&[3, 0, 1]);
        let now = today().and_time(NaiveTime::MIN) + Duration::hours(2);
        assert_eq!(time_since_last_session(&sessions, now), LastSession::HoursAgo(2));
    }

    #[test]
    fn future_dated_session_reads_as_just_now() {
        let sessions = vec![session_on(today() + Days::new(1), 0)];
        let now = today().and_time(NaiveTime::MIN);
        assert_eq!(time_since_last_session(&sessions, now), LastSession::JustNow);
    }

    #[test]
    fn never_without_sessions() {
        let now = today().and_time(NaiveTime::MIN);
        assert_eq!(time_since_last_session(&[], now), LastSession::Never);
        assert_eq!(LastSession::Never.to_string(), "Never");
    }
}
