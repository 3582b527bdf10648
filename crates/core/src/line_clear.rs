//! Line-clear engine
//!
//! Full rows are located on the pre-clear grid first, then one compaction pass
//! removes exactly those rows. Surviving rows keep their relative order and the
//! freed rows at the top come back empty.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::GRID_HEIGHT;

/// Indices of full rows, bottom to top
pub type ClearedRows = ArrayVec<u8, { GRID_HEIGHT as usize }>;

/// Result of one line-clear pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    rows: ClearedRows,
}

impl LineClear {
    /// Number of rows removed this pass (0-4 during play)
    pub fn cleared_count(&self) -> usize {
        self.rows.len()
    }

    /// Row indices from the pre-clear grid, bottom to top
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Collect the full rows of `grid`, scanning bottom to top
pub fn full_rows(grid: &Grid) -> ClearedRows {
    (0..GRID_HEIGHT)
        .rev()
        .filter(|&y| grid.is_row_full(y as usize))
        .collect()
}

/// Remove every full row and compact the rest downward
pub fn clear_lines(grid: &mut Grid) -> LineClear {
    let rows = full_rows(grid);
    if rows.is_empty() {
        return LineClear::default();
    }

    // `rows` is sorted descending, so a cursor walks it alongside the scan.
    let mut pending = rows.iter().peekable();
    let mut write_y = GRID_HEIGHT as usize;
    for read_y in (0..GRID_HEIGHT as usize).rev() {
        if pending.peek().is_some_and(|&&y| y as usize == read_y) {
            pending.next();
            continue;
        }
        write_y -= 1;
        if write_y != read_y {
            grid.copy_row(read_y, write_y);
        }
    }

    for y in 0..write_y {
        grid.clear_row(y);
    }

    LineClear { rows }
}
