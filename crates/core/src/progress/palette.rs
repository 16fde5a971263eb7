use serde::Serialize;
use std::fmt;

/// Categorical marker for checkpoint cells. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Checkpoint,
    Equalization,
    Milestone,
}

impl Marker {
    #[must_use]
    pub fn base_color(self) -> Rgb {
        match self {
            Marker::Checkpoint => GridColors::CHECKPOINT,
            Marker::Equalization => GridColors::EQUALIZATION,
            Marker::Milestone => GridColors::MILESTONE,
        }
    }
}

// Sorted by cell index.
const SPECIAL_CELLS: &[(u32, Marker)] = &[
    // adaptation
    (2, Marker::Checkpoint),
    (6, Marker::Checkpoint),
    // evolution
    (11, Marker::Checkpoint),
    (18, Marker::Checkpoint),
    (25, Marker::Checkpoint),
    (32, Marker::Checkpoint),
    (39, Marker::Checkpoint),
    (46, Marker::Equalization),
    (53, Marker::Checkpoint),
    (60, Marker::Checkpoint),
    // advanced
    (67, Marker::Checkpoint),
    (81, Marker::Checkpoint),
    (95, Marker::Checkpoint),
    (109, Marker::Milestone),
    (123, Marker::Checkpoint),
    (137, Marker::Checkpoint),
    (151, Marker::Checkpoint),
    (165, Marker::Checkpoint),
    (179, Marker::Checkpoint),
    (193, Marker::Checkpoint),
    (207, Marker::Checkpoint),
    (221, Marker::Checkpoint),
    (235, Marker::Checkpoint),
    (249, Marker::Checkpoint),
    (263, Marker::Checkpoint),
    (277, Marker::Checkpoint),
    (291, Marker::Checkpoint),
    (305, Marker::Checkpoint),
    (319, Marker::Checkpoint),
    (333, Marker::Checkpoint),
    (347, Marker::Checkpoint),
    (361, Marker::Checkpoint),
    (375, Marker::Checkpoint),
    (389, Marker::Checkpoint),
    (403, Marker::Checkpoint),
    (417, Marker::Checkpoint),
    (431, Marker::Checkpoint),
    (445, Marker::Checkpoint),
    (459, Marker::Checkpoint),
    (473, Marker::Checkpoint),
    (487, Marker::Checkpoint),
    (501, Marker::Checkpoint),
];

/// Look up the marker for a cell, if it is a special cell.
#[must_use]
pub fn special_cell_marker(cell_index: u32) -> Option<Marker> {
    SPECIAL_CELLS
        .binary_search_by_key(&cell_index, |(idx, _)| *idx)
        .ok()
        .map(|pos| SPECIAL_CELLS[pos].1)
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Subtract `amount` from every channel, clamping at zero.
    #[must_use]
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed grid palette.
pub struct GridColors;

impl GridColors {
    pub const EMPTY: Rgb = Rgb::from_hex(0x1c1c1e);
    pub const FILLED: Rgb = Rgb::from_hex(0x2c2c2e);
    pub const CHECKPOINT: Rgb = Rgb::from_hex(0x00c896);
    pub const EQUALIZATION: Rgb = Rgb::from_hex(0x0A84FF);
    pub const MILESTONE: Rgb = Rgb::from_hex(0xFF9F0A);
    pub const BORDER: Rgb = Rgb::from_hex(0x3a3a3c);
    pub const ACTIVE_BORDER: Rgb = Self::EQUALIZATION;
}

/// How much a completed special cell is darkened per channel.
pub const FILLED_MARKER_DARKEN: u8 = 40;

pub const DEFAULT_BORDER_WIDTH: u8 = 1;
pub const ACTIVE_BORDER_WIDTH: u8 = 2;

/// Resolved colors for drawing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellAppearance {
    pub fill_color: Rgb,
    pub border_color: Rgb,
    pub border_width: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_cells_are_sorted() {
        assert!(SPECIAL_CELLS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn looks_up_markers() {
        assert_eq!(special_cell_marker(2), Some(Marker::Checkpoint));
        assert_eq!(special_cell_marker(46), Some(Marker::Equalization));
        assert_eq!(special_cell_marker(109), Some(Marker::Milestone));
        assert_eq!(special_cell_marker(501), Some(Marker::Checkpoint));
        assert_eq!(special_cell_marker(3), None);
        assert_eq!(special_cell_marker(502), None);
    }

    #[test]
    fn darken_clamps_each_channel() {
        let darker = GridColors::CHECKPOINT.darken(FILLED_MARKER_DARKEN);
        assert_eq!(darker, Rgb { r: 0, g: 160, b: 110 });
        assert_eq!(darker.to_string(), "#00a06e");
    }
}
