//! Tick Tetris (workspace facade crate).
//!
//! Re-exports `tick_tetris::{core,input,engine,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tick_tetris_core as core;
pub use tick_tetris_engine as engine;
pub use tick_tetris_input as input;
pub use tick_tetris_types as types;
