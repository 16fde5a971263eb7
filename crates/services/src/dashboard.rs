use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use storage::repository::TrainingLog;
use tracker_core::progress::{
    DEFAULT_PREVIEW_ROWS, FillState, GridGeometry, RowWindow, StageProgress, compute_stage,
    hours_until_next_cell, select_preview_rows,
};
use tracker_core::stats::SessionStats;
use tracker_core::streak::{LastSession, compute_streak, format_streak, time_since_last_session};

/// Everything the home and progress screens show, derived from one load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub cumulative_hours: f64,
    pub fill: FillState,
    pub stage: StageProgress,
    pub streak_days: u32,
    pub last_session: LastSession,
    pub stats: SessionStats,
    pub hours_until_next_cell: f64,
    pub preview: Option<RowWindow>,
}

impl Dashboard {
    #[must_use]
    pub fn build(
        log: &TrainingLog,
        now: NaiveDateTime,
        today: NaiveDate,
        streak_lookback_days: u32,
    ) -> Self {
        let grid = GridGeometry::STANDARD;
        let hours = log.cumulative_hours;
        let fill = grid.fill_state(hours);

        Self {
            cumulative_hours: hours.value(),
            fill,
            stage: compute_stage(hours),
            streak_days: compute_streak(&log.sessions, today, streak_lookback_days),
            last_session: time_since_last_session(&log.sessions, now),
            stats: SessionStats::from_sessions(&log.sessions),
            hours_until_next_cell: hours_until_next_cell(hours),
            preview: select_preview_rows(fill.current_row_index, grid.rows, DEFAULT_PREVIEW_ROWS),
        }
    }

    #[must_use]
    pub fn streak_label(&self) -> String {
        format_streak(self.streak_days)
    }
}
