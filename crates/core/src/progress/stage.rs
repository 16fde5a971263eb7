use serde::Serialize;

use super::grid::compute_fill_state;
use crate::model::CumulativeHours;

/// A named phase of the program covering an inclusive range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramStage {
    pub name: &'static str,
    pub start_cell: u32,
    pub end_cell: u32,
}

impl ProgramStage {
    #[must_use]
    pub fn contains(&self, cell_index: u32) -> bool {
        (self.start_cell..=self.end_cell).contains(&cell_index)
    }

    #[must_use]
    pub fn cell_count(&self) -> u32 {
        self.end_cell - self.start_cell + 1
    }
}

/// Contiguous, non-overlapping stages starting at cell 0.
pub const PROGRAM_STAGES: &[ProgramStage] = &[
    ProgramStage {
        name: "Adaptation 1",
        start_cell: 0,
        end_cell: 1,
    },
    ProgramStage {
        name: "Adaptation 2",
        start_cell: 2,
        end_cell: 6,
    },
    ProgramStage {
        name: "Adaptation 3",
        start_cell: 7,
        end_cell: 10,
    },
    ProgramStage {
        name: "Evolution",
        start_cell: 11,
        end_cell: 66,
    },
    ProgramStage {
        name: "Advanced",
        start_cell: 67,
        end_cell: 501,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    pub stage_name: &'static str,
    /// Completion of the current stage, 0..=100.
    pub percentage: u8,
}

/// The stage whose range contains `cell_index`, if any.
#[must_use]
pub fn stage_for_cell(cell_index: u32) -> Option<&'static ProgramStage> {
    PROGRAM_STAGES.iter().find(|stage| stage.contains(cell_index))
}

/// Current stage and how far through it the hours reach.
///
/// Past the last stage the result saturates at the last stage with 100%.
/// The percentage is rounded, so it can read 100 while the final cell of a
/// stage is still partially filled.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_stage(hours: CumulativeHours) -> StageProgress {
    let fill = compute_fill_state(hours);

    let Some(stage) = stage_for_cell(fill.filled_cell_count) else {
        let last = PROGRAM_STAGES[PROGRAM_STAGES.len() - 1];
        return StageProgress {
            stage_name: last.name,
            percentage: 100,
        };
    };

    let completed = f64::from(fill.filled_cell_count - stage.start_cell);
    let ratio = (completed + fill.partial_fraction) / f64::from(stage.cell_count());

    StageProgress {
        stage_name: stage.name,
        percentage: (ratio * 100.0).round() as u8,
    }
}
