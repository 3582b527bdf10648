//! Geometry rules - bounds, collision and pivot rotation
//!
//! Every function here is pure. Moves and rotations produce a candidate piece;
//! the caller keeps the previous piece whenever [`is_blocked`] rejects the
//! candidate. Rotation never searches for kicks.

use crate::grid::Grid;
use crate::piece::{Piece, Point};

/// True iff every cell lies inside the grid
pub fn in_bounds(piece: &Piece) -> bool {
    piece.cells().iter().all(|p| Grid::contains(p.x, p.y))
}

/// True iff any cell of the piece is already occupied.
///
/// # Panics
///
/// Panics when the piece is out of bounds; use [`is_blocked`] unless the piece
/// is known to be in bounds.
pub fn collides(grid: &Grid, piece: &Piece) -> bool {
    piece.cells().iter().any(|p| match grid.is_occupied(p.x, p.y) {
        Ok(occupied) => occupied,
        Err(err) => panic!("collision test on unchecked piece: {err}"),
    })
}

/// Out of bounds or overlapping committed cells
pub fn is_blocked(grid: &Grid, piece: &Piece) -> bool {
    !in_bounds(piece) || collides(grid, piece)
}

/// Translate every cell
pub fn shift(piece: &Piece, dx: i8, dy: i8) -> Piece {
    piece.map_cells(|p| p.offset(dx, dy))
}

/// Rotate 90° around the kind's pivot cell. O pieces come back unchanged.
///
/// With y growing downward, clockwise maps an offset `(dx, dy)` from the pivot
/// to `(-dy, dx)`; counter-clockwise maps it to `(dy, -dx)`.
pub fn rotate(piece: &Piece, clockwise: bool) -> Piece {
    let Some(pivot) = piece.pivot() else {
        return *piece;
    };

    piece.map_cells(|p| {
        let dx = p.x - pivot.x;
        let dy = p.y - pivot.y;
        if clockwise {
            Point::new(pivot.x - dy, pivot.y + dx)
        } else {
            Point::new(pivot.x + dy, pivot.y - dx)
        }
    })
}

/// Shift, keeping the result only if it is not blocked
pub fn try_shift(grid: &Grid, piece: &Piece, dx: i8, dy: i8) -> Option<Piece> {
    let candidate = shift(piece, dx, dy);
    (!is_blocked(grid, &candidate)).then_some(candidate)
}

/// Rotate in place, keeping the result only if it is not blocked
pub fn try_rotate(grid: &Grid, piece: &Piece, clockwise: bool) -> Option<Piece> {
    let candidate = rotate(piece, clockwise);
    (!is_blocked(grid, &candidate)).then_some(candidate)
}

/// Lowest unblocked position reachable by dropping straight down
pub fn drop_position(grid: &Grid, piece: &Piece) -> Piece {
    let mut landed = *piece;
    while let Some(next) = try_shift(grid, &landed, 0, 1) {
        landed = next;
    }
    landed
}
