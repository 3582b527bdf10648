//! Spawner - picks the next kind and places it at the spawn anchor

use crate::geometry::collides;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::PieceSource;

/// A freshly placed piece and whether it landed on committed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub piece: Piece,
    /// The spawn position already collides; the grid must be cleared before
    /// spawning again.
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Spawner<S> {
    source: S,
}

impl<S: PieceSource> Spawner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Draw a kind and place it. Spawn templates always sit inside the grid,
    /// so only collision decides game over.
    pub fn spawn(&mut self, grid: &Grid) -> Spawn {
        let piece = Piece::spawn(self.source.next_kind());
        let game_over = collides(grid, &piece);
        Spawn { piece, game_over }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
