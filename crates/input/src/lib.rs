//! Input resolver module (engine-facing).
//!
//! Turns raw device events into per-slot logical button snapshots. Keyboard
//! edges arrive as `crossterm` key codes; pads are polled as level state with
//! an analog left stick. Two snapshot sets are kept so the simulation can tell
//! a fresh press from a held button.

pub mod controller;
pub mod map;
pub mod pad;
pub mod resolver;

pub use tick_tetris_types as types;

pub use controller::{ButtonEdge, ControllerSnapshot, InputFrame};
pub use map::{map_key, should_quit};
pub use pad::{normalize_stick, PadState};
pub use resolver::{InputConfig, InputResolver, KeyTransition, SnapshotSet};
