use serde::Serialize;

use super::HOURS_PER_CELL;
use super::palette::{
    ACTIVE_BORDER_WIDTH, CellAppearance, DEFAULT_BORDER_WIDTH, FILLED_MARKER_DARKEN, GridColors,
    Marker, special_cell_marker,
};
use crate::model::CumulativeHours;

/// Fixed column/row layout of the tracker grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
}

impl GridGeometry {
    /// The 8 × 14 grid shown by the tracker.
    pub const STANDARD: Self = Self {
        columns: 8,
        rows: 14,
    };

    #[must_use]
    pub fn cell_index(&self, row: u32, column: u32) -> u32 {
        row * self.columns + column
    }

    /// Fill state for `hours` laid out on this grid.
    #[must_use]
    pub fn fill_state(&self, hours: CumulativeHours) -> FillState {
        FillState::compute(hours, self.columns)
    }

    /// Render states for every cell of `row`, left to right.
    pub fn row_cells(
        &self,
        row: u32,
        fill: &FillState,
    ) -> impl Iterator<Item = CellRenderState> + '_ {
        let fill = *fill;
        (0..self.columns).map(move |col| classify_cell(self.cell_index(row, col), &fill))
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// How far the accumulated hours reach into the cell sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillState {
    pub filled_cell_count: u32,
    /// Progress into the next cell, in `[0, 1)`.
    pub partial_fraction: f64,
    pub current_row_index: u32,
}

impl FillState {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(hours: CumulativeHours, columns: u32) -> Self {
        let h = hours.value();
        // `CumulativeHours` is finite and non-negative; `as` saturates past u32::MAX.
        let filled_cell_count = (h / HOURS_PER_CELL).floor() as u32;
        let partial_fraction = (h % HOURS_PER_CELL) / HOURS_PER_CELL;
        Self {
            filled_cell_count,
            partial_fraction,
            current_row_index: filled_cell_count / columns.max(1),
        }
    }

    /// Partial progress as a whole percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn partial_percentage(&self) -> u8 {
        (self.partial_fraction * 100.0).round() as u8
    }
}

/// Fill state on the standard grid.
#[must_use]
pub fn compute_fill_state(hours: CumulativeHours) -> FillState {
    GridGeometry::STANDARD.fill_state(hours)
}

/// Hours left until the current cell is complete.
#[must_use]
pub fn hours_until_next_cell(hours: CumulativeHours) -> f64 {
    HOURS_PER_CELL - (hours.value() % HOURS_PER_CELL)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellFill {
    Empty,
    Filled,
    Partial { fraction: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellRenderState {
    pub index: u32,
    pub fill: CellFill,
    pub marker: Option<Marker>,
    /// The next cell needing progress.
    pub is_active: bool,
}

impl CellRenderState {
    #[must_use]
    pub fn is_filled(&self) -> bool {
        matches!(self.fill, CellFill::Filled)
    }

    /// Colors and border used to draw this cell.
    #[must_use]
    pub fn appearance(&self) -> CellAppearance {
        let fill_color = match (self.fill, self.marker) {
            (CellFill::Filled, Some(marker)) => marker.base_color().darken(FILLED_MARKER_DARKEN),
            (CellFill::Filled, None) => GridColors::FILLED,
            (_, Some(marker)) => marker.base_color(),
            (_, None) => GridColors::EMPTY,
        };
        let (border_color, border_width) = if self.is_active {
            (GridColors::ACTIVE_BORDER, ACTIVE_BORDER_WIDTH)
        } else {
            (GridColors::BORDER, DEFAULT_BORDER_WIDTH)
        };
        CellAppearance {
            fill_color,
            border_color,
            border_width,
        }
    }
}

/// Classify a single cell against the current fill state.
#[must_use]
pub fn classify_cell(cell_index: u32, fill: &FillState) -> CellRenderState {
    let filled = fill.filled_cell_count;
    let state = if cell_index < filled {
        CellFill::Filled
    } else if cell_index == filled && fill.partial_fraction > 0.0 {
        CellFill::Partial {
            fraction: fill.partial_fraction,
        }
    } else {
        CellFill::Empty
    };

    CellRenderState {
        index: cell_index,
        fill: state,
        marker: special_cell_marker(cell_index),
        // With nothing filled this is cell 0.
        is_active: cell_index == filled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(h: f64) -> CumulativeHours {
        CumulativeHours::new(h).unwrap()
    }

    #[test]
    fn fill_state_splits_whole_and_partial_cells() {
        for h in [0.0, 0.5, 7.99, 8.0, 12.0, 63.5, 64.0, 250.25, 4020.0] {
            let fill = compute_fill_state(hours(h));
            assert_eq!(f64::from(fill.filled_cell_count), (h / 8.0).floor());
            assert!((fill.partial_fraction - (h % 8.0) / 8.0).abs() < 1e-12);
            assert!((0.0..1.0).contains(&fill.partial_fraction));
            assert_eq!(fill.current_row_index, fill.filled_cell_count / 8);
        }
    }

    #[test]
    fn fill_state_example_values() {
        let fill = compute_fill_state(hours(68.0));
        assert_eq!(fill.filled_cell_count, 8);
        assert!((fill.partial_fraction - 0.5).abs() < 1e-12);
        assert_eq!(fill.current_row_index, 1);
        assert_eq!(fill.partial_percentage(), 50);
    }

    #[test]
    fn each_cell_has_exactly_one_fill_and_one_active_cell() {
        let grid = GridGeometry::STANDARD;
        for h in [0.0, 3.0, 8.0, 20.5, 96.0, 500.0] {
            let fill = compute_fill_state(hours(h));
            let cells: Vec<_> = (0..grid.rows)
                .flat_map(|row| grid.row_cells(row, &fill).collect::<Vec<_>>())
                .collect();
            assert_eq!(cells.len(), 112);
            let active = cells.iter().filter(|c| c.is_active).count();
            assert!(active <= 1, "{h}h produced {active} active cells");
            let filled = cells.iter().filter(|c| c.is_filled()).count();
            assert_eq!(filled, fill.filled_cell_count as usize);
            let partial = cells
                .iter()
                .filter(|c| matches!(c.fill, CellFill::Partial { .. }))
                .count();
            assert_eq!(partial, usize::from(fill.partial_fraction > 0.0));
        }
    }

    #[test]
    fn first_cell_is_active_before_any_progress() {
        let fill = compute_fill_state(CumulativeHours::ZERO);
        let first = classify_cell(0, &fill);
        assert!(first.is_active);
        assert_eq!(first.fill, CellFill::Empty);
        assert!(!classify_cell(1, &fill).is_active);
    }

    #[test]
    fn next_cell_is_active_with_or_without_partial_fill() {
        let exact = compute_fill_state(hours(16.0));
        let next = classify_cell(2, &exact);
        assert!(next.is_active);
        assert_eq!(next.fill, CellFill::Empty);

        let partial = compute_fill_state(hours(18.0));
        let next = classify_cell(2, &partial);
        assert!(next.is_active);
        assert_eq!(next.fill, CellFill::Partial { fraction: 0.25 });
        assert!(classify_cell(1, &partial).is_filled());
    }

    #[test]
    fn appearance_darkens_completed_markers_and_highlights_active() {
        let fill = compute_fill_state(hours(24.0));

        let done_checkpoint = classify_cell(2, &fill).appearance();
        assert_eq!(
            done_checkpoint.fill_color,
            GridColors::CHECKPOINT.darken(FILLED_MARKER_DARKEN)
        );
        assert_eq!(done_checkpoint.border_width, DEFAULT_BORDER_WIDTH);

        let done_plain = classify_cell(0, &fill).appearance();
        assert_eq!(done_plain.fill_color, GridColors::FILLED);

        let active = classify_cell(3, &fill).appearance();
        assert_eq!(active.fill_color, GridColors::EMPTY);
        assert_eq!(active.border_color, GridColors::ACTIVE_BORDER);
        assert_eq!(active.border_width, ACTIVE_BORDER_WIDTH);

        let upcoming_checkpoint = classify_cell(6, &fill).appearance();
        assert_eq!(upcoming_checkpoint.fill_color, GridColors::CHECKPOINT);
    }

    #[test]
    fn hours_until_next_cell_counts_down() {
        assert!((hours_until_next_cell(hours(5.0)) - 3.0).abs() < 1e-12);
        assert!((hours_until_next_cell(hours(16.0)) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn fill_state_is_idempotent() {
        let h = hours(123.456);
        assert_eq!(compute_fill_state(h), compute_fill_state(h));
    }
}
