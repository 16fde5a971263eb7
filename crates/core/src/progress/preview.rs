use serde::Serialize;

/// Rows shown in the condensed grid preview.
pub const DEFAULT_PREVIEW_ROWS: u32 = 3;

/// Inclusive range of grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowWindow {
    pub start_row: u32,
    pub end_row: u32,
}

impl RowWindow {
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.start_row..=self.end_row
    }
}

/// Pick the rows to show around `current_row`: one above, the current row,
/// and the rest below.
///
/// Near the bottom the window shifts up so it still shows
/// `visible_row_count` rows ending at the last row. A grid with fewer rows
/// than that is shown in full. A `visible_row_count` of zero is treated as one.
/// Returns `None` for a grid with no rows.
#[must_use]
pub fn select_preview_rows(
    current_row: u32,
    total_rows: u32,
    visible_row_count: u32,
) -> Option<RowWindow> {
    if total_rows == 0 {
        return None;
    }
    let visible = visible_row_count.max(1);
    let last_row = total_rows.saturating_sub(1);

    let mut start_row = current_row.saturating_sub(1);
    let end_row = start_row.saturating_add(visible - 1).min(last_row);

    let cut_short = end_row == last_row && end_row.saturating_sub(start_row) < visible - 1;
    // start_row > end_row when progress has run past the last row.
    if cut_short || start_row > end_row {
        start_row = total_rows.saturating_sub(visible);
    }

    Some(RowWindow { start_row, end_row })
}
