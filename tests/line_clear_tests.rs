//! Line-clear tests

use tick_tetris::core::{clear_lines, Grid};
use tick_tetris::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

fn fill_row(grid: &mut Grid, y: i8, kind: PieceKind) {
    for x in 0..GRID_WIDTH as i8 {
        grid.set(x, y, Some(kind)).unwrap();
    }
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut grid = Grid::new();
    grid.set(0, 19, Some(PieceKind::T)).unwrap();
    let before = grid.clone();

    let cleared = clear_lines(&mut grid);
    assert!(cleared.is_empty());
    assert_eq!(cleared.cleared_count(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_clear_rows_five_and_seven() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 5, PieceKind::I);
    fill_row(&mut grid, 7, PieceKind::I);
    // Markers above, between and below the full rows.
    grid.set(2, 4, Some(PieceKind::T)).unwrap();
    grid.set(3, 6, Some(PieceKind::S)).unwrap();
    grid.set(4, 8, Some(PieceKind::Z)).unwrap();

    let cleared = clear_lines(&mut grid);

    assert_eq!(cleared.cleared_count(), 2);
    assert_eq!(cleared.rows(), &[7, 5]);

    // Below the cleared band nothing moves.
    assert_eq!(grid.cell(4, 8), Ok(Some(PieceKind::Z)));
    // Row 6 dropped one row, row 4 dropped two.
    assert_eq!(grid.cell(3, 7), Ok(Some(PieceKind::S)));
    assert_eq!(grid.cell(2, 6), Ok(Some(PieceKind::T)));
    assert_eq!(grid.occupied_count(), 3);

    for y in 0..2 {
        assert!(grid.row(y).unwrap().iter().all(|c| c.is_none()));
    }
}

#[test]
fn test_clear_four_bottom_rows() {
    let mut grid = Grid::new();
    for y in 16..20 {
        fill_row(&mut grid, y, PieceKind::I);
    }
    grid.set(0, 15, Some(PieceKind::J)).unwrap();

    let cleared = clear_lines(&mut grid);
    assert_eq!(cleared.cleared_count(), 4);
    assert_eq!(grid.cell(0, GRID_HEIGHT as i8 - 1), Ok(Some(PieceKind::J)));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_no_full_row_remains_after_clear() {
    let mut grid = Grid::new();
    for y in (0..GRID_HEIGHT as i8).step_by(3) {
        fill_row(&mut grid, y, PieceKind::O);
    }
    clear_lines(&mut grid);
    assert!((0..GRID_HEIGHT as usize).all(|y| !grid.is_row_full(y)));
    assert_eq!(grid.occupied_count(), 0);
}
