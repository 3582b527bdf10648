//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the simulation model and its rules. It has **no
//! dependencies** on input devices, clocks, or presentation.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 committed-cell matrix
//! - [`piece`]: spawn templates, pivots, and the active [`Piece`]
//! - [`geometry`]: bounds, collision, shift and pivot rotation
//! - [`line_clear`]: two-phase full-row removal
//! - [`spawner`]: uniform piece selection and spawn-time game over
//! - [`rng`]: piece sources (seeded LCG, fixed sequences for tests)
//!
//! # Rules
//!
//! - Rotation pivots around one cell of the piece (none for O) with no wall kicks
//! - A rejected move or rotation leaves the piece where it was
//! - Game over is only detected when a new piece spawns onto committed cells
//!
//! # Example
//!
//! ```
//! use tick_tetris_core::{geometry, FixedSequence, Grid, Spawner};
//! use tick_tetris_types::PieceKind;
//!
//! let mut grid = Grid::new();
//! let mut spawner = Spawner::new(FixedSequence::new([PieceKind::O]));
//!
//! let spawn = spawner.spawn(&grid);
//! assert!(!spawn.game_over);
//!
//! let landed = geometry::drop_position(&grid, &spawn.piece);
//! grid.commit(&landed);
//! assert_eq!(grid.occupied_count(), 4);
//! ```

pub mod geometry;
pub mod grid;
pub mod line_clear;
pub mod piece;
pub mod rng;
pub mod spawner;

pub use tick_tetris_types as types;

pub use geometry::{collides, in_bounds, is_blocked, rotate, shift};
pub use grid::{Grid, GridError};
pub use line_clear::{clear_lines, LineClear};
pub use piece::{Piece, Point};
pub use rng::{FixedSequence, PieceSource, SimpleRng, UniformPieces};
pub use spawner::{Spawn, Spawner};
