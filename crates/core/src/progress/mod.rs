//! Progress grid & stage engine.
//!
//! Pure functions from `CumulativeHours` to grid cell states, the current
//! program stage, and the preview row window. Nothing here keeps state; every
//! call recomputes from its inputs.

mod grid;
mod palette;
mod preview;
mod stage;

pub use grid::{
    CellFill, CellRenderState, FillState, GridGeometry, classify_cell, compute_fill_state,
    hours_until_next_cell,
};
pub use palette::{
    ACTIVE_BORDER_WIDTH, CellAppearance, DEFAULT_BORDER_WIDTH, FILLED_MARKER_DARKEN, GridColors,
    Marker, Rgb, special_cell_marker,
};
pub use preview::{DEFAULT_PREVIEW_ROWS, RowWindow, select_preview_rows};
pub use stage::{PROGRAM_STAGES, ProgramStage, StageProgress, compute_stage, stage_for_cell};

/// Hours of training represented by one grid cell.
pub const HOURS_PER_CELL: f64 = 8.0;
