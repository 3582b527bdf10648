//! Piece module - tetromino templates and the active falling piece
//!
//! Templates are `(dx, dy)` offsets from the spawn anchor with y growing
//! downward. A piece stores its four cells in absolute grid coordinates so
//! that rotation can pivot around one of its own cells.

use crate::types::{PieceKind, GRID_WIDTH};

/// Offset of a single mino relative to the anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceTemplate = [MinoOffset; 4];

/// Spawn anchor (column, row) shared by every kind
pub const SPAWN_ANCHOR: Point = Point::new((GRID_WIDTH / 2) as i8, 0);

/// Get the spawn template for a piece kind
pub fn template(kind: PieceKind) -> PieceTemplate {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::T => [(0, 0), (-1, 1), (0, 1), (1, 1)],
        PieceKind::S => [(-1, 1), (0, 1), (0, 0), (1, 0)],
        PieceKind::Z => [(-1, 0), (0, 0), (0, 1), (1, 1)],
        PieceKind::J => [(-1, 0), (-1, 1), (0, 1), (1, 1)],
        PieceKind::L => [(-1, 1), (0, 1), (1, 1), (1, 0)],
    }
}

/// Index of the cell a kind rotates around; `None` for O, which never rotates
pub fn pivot_index(kind: PieceKind) -> Option<usize> {
    match kind {
        PieceKind::O => None,
        PieceKind::T | PieceKind::J => Some(2),
        PieceKind::I | PieceKind::S | PieceKind::Z | PieceKind::L => Some(1),
    }
}

/// Absolute grid coordinate (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Active falling piece: four absolute cells plus its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    cells: [Point; 4],
}

impl Piece {
    /// Build a piece from explicit cells
    pub fn new(kind: PieceKind, cells: [Point; 4]) -> Self {
        Self { kind, cells }
    }

    /// Place a kind's template at `anchor`
    pub fn at(kind: PieceKind, anchor: Point) -> Self {
        let cells = template(kind).map(|(dx, dy)| anchor.offset(dx, dy));
        Self { kind, cells }
    }

    /// Place a kind's template at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_ANCHOR)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> &[Point; 4] {
        &self.cells
    }

    /// The cell rotation pivots around, if the kind rotates
    pub fn pivot(&self) -> Option<Point> {
        pivot_index(self.kind).map(|i| self.cells[i])
    }

    /// Compare occupied cells, ignoring cell order
    pub fn same_cells(&self, other: &Piece) -> bool {
        let mut a = self.cells;
        let mut b = other.cells;
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    pub(crate) fn map_cells(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(f),
        }
    }
}
