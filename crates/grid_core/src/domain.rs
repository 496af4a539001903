use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: usize,
    pub cell: usize,
}

impl CellAddress {
    pub fn new(row: usize, cell: usize) -> Self {
        Self { row, cell }
    }
}

/// Inclusive rectangular span of cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub from_row: usize,
    pub from_cell: usize,
    pub to_row: usize,
    pub to_cell: usize,
}

impl CellRange {
    pub fn new(from_row: usize, from_cell: usize, to_row: usize, to_cell: usize) -> Self {
        Self {
            from_row,
            from_cell,
            to_row,
            to_cell,
        }
    }

    /// Full-width range covering exactly one row.
    pub fn single_row(row: usize, last_cell: usize) -> Self {
        Self {
            from_row: row,
            from_cell: 0,
            to_row: row,
            to_cell: last_cell,
        }
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.from_row..=self.to_row
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.from_row <= row && row <= self.to_row
    }
}

/// On-screen bounds of a rendered cell, in grid-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBox {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl CellBox {
    pub fn vertical_midpoint(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOptions {
    pub multi_select: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { multi_select: true }
    }
}
