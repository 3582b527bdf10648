//! Grid tests - bounds, cell access and commit

use tick_tetris::core::{Grid, GridError, Piece, Point};
use tick_tetris::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);

    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            assert!(Grid::contains(x, y), "Cell ({}, {}) should be inside", x, y);
            assert_eq!(grid.cell(x, y), Ok(None));
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_grid_out_of_range_is_an_error() {
    let grid = Grid::new();

    assert_eq!(grid.cell(-1, 0), Err(GridError::OutOfRange { x: -1, y: 0 }));
    assert_eq!(grid.cell(0, -1), Err(GridError::OutOfRange { x: 0, y: -1 }));
    assert!(grid.is_occupied(GRID_WIDTH as i8, 0).is_err());
    assert!(grid.is_occupied(0, GRID_HEIGHT as i8).is_err());
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new();

    grid.set(5, 10, Some(PieceKind::T)).unwrap();
    assert_eq!(grid.cell(5, 10), Ok(Some(PieceKind::T)));
    assert_eq!(grid.is_occupied(5, 10), Ok(true));

    grid.set(5, 10, None).unwrap();
    assert_eq!(grid.is_occupied(5, 10), Ok(false));

    let mut untouched = grid.clone();
    assert!(untouched.set(10, 0, Some(PieceKind::I)).is_err());
    assert_eq!(untouched, grid);
}

#[test]
fn test_commit_tags_cells_with_kind() {
    let mut grid = Grid::new();
    let piece = Piece::at(PieceKind::O, Point::new(0, 18));
    grid.commit(&piece);

    assert_eq!(grid.occupied_count(), 4);
    for p in piece.cells() {
        assert_eq!(grid.cell(p.x, p.y), Ok(Some(PieceKind::O)));
    }
}

#[test]
#[should_panic(expected = "commit of unchecked piece")]
fn test_commit_out_of_bounds_panics() {
    let mut grid = Grid::new();
    let piece = Piece::at(PieceKind::I, Point::new(0, 0));
    grid.commit(&piece);
}

#[test]
fn test_row_full_detection() {
    let mut grid = Grid::new();
    for x in 0..GRID_WIDTH as i8 - 1 {
        grid.set(x, 19, Some(PieceKind::I)).unwrap();
    }
    assert!(!grid.is_row_full(19));

    grid.set(GRID_WIDTH as i8 - 1, 19, Some(PieceKind::L)).unwrap();
    assert!(grid.is_row_full(19));
    assert!(!grid.is_row_full(GRID_HEIGHT as usize));
}

#[test]
fn test_clear_empties_everything() {
    let mut grid = Grid::new();
    grid.set(3, 3, Some(PieceKind::S)).unwrap();
    grid.set(9, 19, Some(PieceKind::Z)).unwrap();
    grid.clear();
    assert_eq!(grid, Grid::new());
}
