//! Grid module - the committed cell matrix
//!
//! The grid is a 10x20 matrix where each cell is empty or tagged with the kind
//! of the piece that filled it. Uses a flat array for cache locality and
//! zero-allocation. Coordinates: (x, y) where x ranges 0..9 (left to right),
//! y ranges 0..19 (top to bottom).

use thiserror::Error;

use crate::piece::Piece;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

const WIDTH: usize = GRID_WIDTH as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfRange { x: i8, y: i8 },
}

/// The committed cells - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::contains(x, y) {
            Some((y as usize) * WIDTH + (x as usize))
        } else {
            None
        }
    }

    #[inline(always)]
    fn checked_index(x: i8, y: i8) -> Result<usize, GridError> {
        Self::index(x, y).ok_or(GridError::OutOfRange { x, y })
    }

    /// Whether (x, y) lies inside the grid
    #[inline]
    pub fn contains(x: i8, y: i8) -> bool {
        x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Whether a cell is filled. Callers bounds-check first.
    pub fn is_occupied(&self, x: i8, y: i8) -> Result<bool, GridError> {
        Self::checked_index(x, y).map(|idx| self.cells[idx].is_some())
    }

    /// The colour tag stored at (x, y)
    pub fn cell(&self, x: i8, y: i8) -> Result<Cell, GridError> {
        Self::checked_index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite a single cell; used to build fixtures and by presenters' tests
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> Result<(), GridError> {
        let idx = Self::checked_index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Bake a piece into the grid.
    ///
    /// # Panics
    ///
    /// Panics if any cell lies outside the grid. The target cells must be
    /// empty; overlap is only checked in debug builds.
    pub fn commit(&mut self, piece: &Piece) {
        for p in piece.cells() {
            let idx = match Self::checked_index(p.x, p.y) {
                Ok(idx) => idx,
                Err(err) => panic!("commit of unchecked piece {:?}: {err}", piece.kind()),
            };
            debug_assert!(
                self.cells[idx].is_none(),
                "commit over occupied cell ({}, {})",
                p.x,
                p.y
            );
            self.cells[idx] = Some(piece.kind());
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow one row, top row first
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= GRID_HEIGHT as usize {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy row `src` over row `dst` (no allocation, handles overlap)
    pub(crate) fn copy_row(&mut self, src: usize, dst: usize) {
        let src_start = src * WIDTH;
        self.cells
            .copy_within(src_start..src_start + WIDTH, dst * WIDTH);
    }

    pub(crate) fn clear_row(&mut self, y: usize) {
        let start = y * WIDTH;
        for cell in &mut self.cells[start..start + WIDTH] {
            *cell = None;
        }
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
