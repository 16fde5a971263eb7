//! Plain-text rendering of the dashboard and progress grid.

use std::fmt::Write as _;

use services::Dashboard;
use tracker_core::model::{AppSettings, CumulativeHours};
use tracker_core::progress::{CellFill, CellRenderState, GridGeometry, Marker, RowWindow};
use tracker_core::stats::format_duration_long;

pub fn dashboard(dash: &Dashboard, settings: AppSettings) -> String {
    let mut out = String::new();
    let total = format!("{:.1}h", dash.cumulative_hours);
    let goal = format!("{}%", dash.stage.percentage);
    let trained = dash.last_session.to_string();

    if settings.constrained_view() {
        let _ = writeln!(out, "Total    {total}");
        let _ = writeln!(out, "Goal     {goal}");
        let _ = writeln!(out, "Trained  {trained}");
    } else {
        let _ = writeln!(out, "Total {total}   Goal {goal}   Trained {trained}");
    }

    let _ = writeln!(out, "Stage: {} ({}%)", dash.stage.stage_name, dash.stage.percentage);
    let _ = writeln!(out, "{}", dash.streak_label());
    let _ = writeln!(out, "Next bar in: {:.2}h", dash.hours_until_next_cell);
    let _ = writeln!(out, "Sessions logged: {}", dash.stats.sessions_logged);
    let _ = writeln!(
        out,
        "Average session: {} min",
        dash.stats.average_session_minutes
    );
    let _ = writeln!(
        out,
        "Total time: {}",
        format_duration_long(dash.stats.total_minutes)
    );
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn glyph(cell: &CellRenderState) -> char {
    match (cell.fill, cell.marker) {
        (CellFill::Filled, None) => '#',
        (CellFill::Filled, Some(marker)) => marker_char(marker).to_ascii_uppercase(),
        (CellFill::Partial { fraction }, _) => {
            char::from_digit((fraction * 10.0).floor() as u32, 10).unwrap_or('+')
        }
        (CellFill::Empty, None) => '.',
        (CellFill::Empty, Some(marker)) => marker_char(marker),
    }
}

fn marker_char(marker: Marker) -> char {
    match marker {
        Marker::Checkpoint => 'c',
        Marker::Equalization => 'e',
        Marker::Milestone => 'm',
    }
}

/// Draw `window` rows of the grid, or all rows when `window` is `None`.
///
/// The active cell is bracketed; partial cells show tenths of progress.
pub fn grid(hours: CumulativeHours, window: Option<RowWindow>) -> String {
    let geometry = GridGeometry::STANDARD;
    let fill = geometry.fill_state(hours);
    let window = window.unwrap_or(RowWindow {
        start_row: 0,
        end_row: geometry.rows - 1,
    });

    let mut out = String::new();
    for row in window.rows() {
        let _ = write!(out, "{:>3} ", row + 1);
        for cell in geometry.row_cells(row, &fill) {
            let g = glyph(&cell);
            if cell.is_active {
                let _ = write!(out, "[{g}]");
            } else {
                let _ = write!(out, " {g} ");
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_marks_filled_partial_and_active_cells() {
        // Two full cells, then half of checkpoint cell 2.
        let hours = CumulativeHours::new(20.0).unwrap();
        let text = grid(
            hours,
            Some(RowWindow {
                start_row: 0,
                end_row: 0,
            }),
        );
        assert_eq!(text, "  1  #  # [5] .  .  .  c  . \n");
    }

    #[test]
    fn full_grid_draws_every_row() {
        let text = grid(CumulativeHours::ZERO, None);
        assert_eq!(text.lines().count(), 14);
        assert!(text.starts_with("  1 [.]"));
    }
}
