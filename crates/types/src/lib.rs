//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the simulation,
//! the input resolver and any presenter can share them freely.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: column `GRID_WIDTH / 2`, row 0
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_REFRESH_HZ` | 60 | Display refresh assumed when the host cannot report one |
//! | `MOVE_UPDATE_INTERVAL_MS` | 150 | Gravity cadence (one row per interval) |
//! | `SLEEP_GRANULARITY_MS` | 1 | Smallest coarse sleep the pacer requests |
//!
//! The simulation ticks at half the display refresh rate, so the 60Hz fallback
//! yields a 30Hz tick.
//!
//! # Analog Input
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STICK_DEADZONE` | 7849 | Raw magnitude treated as neutral |
//! | `STICK_DIRECTION_THRESHOLD` | 0.5 | Normalized deflection that synthesizes a move button |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{LogicalButton, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::ALL.len(), 7);
//!
//! assert_eq!(LogicalButton::from_index(LogicalButton::RotateCw.index()), Some(LogicalButton::RotateCw));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Refresh rate used when the display cannot report a plausible one
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Gravity interval: the active piece falls one row per interval
pub const MOVE_UPDATE_INTERVAL_MS: u32 = 150;

/// Coarse sleep granularity of the frame pacer
pub const SLEEP_GRANULARITY_MS: u32 = 1;

/// Keyboard plus four pads
pub const MAX_CONTROLLERS: usize = 5;

/// Controller slot fed by keyboard events
pub const KEYBOARD_SLOT: usize = 0;

/// Left-stick magnitude (raw units) below which input is neutral
pub const STICK_DEADZONE: i16 = 7849;

/// Normalized stick deflection that counts as a digital direction press
pub const STICK_DIRECTION_THRESHOLD: f32 = 0.5;


/// The seven tetromino piece kinds
///
/// The kind doubles as the colour tag of committed cells; presenters map it to
/// an actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Look up a kind by catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell committed by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Number of logical buttons per controller
pub const BUTTON_COUNT: usize = 10;

/// Abstract input identities, independent of the physical key or pad button
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalButton {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    Start,
    Back,
    LeftShoulder,
    RightShoulder,
}

impl LogicalButton {
    /// Every button, ordered by its slot in a snapshot's button table
    pub const ALL: [LogicalButton; BUTTON_COUNT] = [
        LogicalButton::MoveUp,
        LogicalButton::MoveDown,
        LogicalButton::MoveLeft,
        LogicalButton::MoveRight,
        LogicalButton::RotateCw,
        LogicalButton::RotateCcw,
        LogicalButton::Start,
        LogicalButton::Back,
        LogicalButton::LeftShoulder,
        LogicalButton::RightShoulder,
    ];

    /// Fixed id → index table
    #[inline]
    pub fn index(self) -> usize {
        match self {
            LogicalButton::MoveUp => 0,
            LogicalButton::MoveDown => 1,
            LogicalButton::MoveLeft => 2,
            LogicalButton::MoveRight => 3,
            LogicalButton::RotateCw => 4,
            LogicalButton::RotateCcw => 5,
            LogicalButton::Start => 6,
            LogicalButton::Back => 7,
            LogicalButton::LeftShoulder => 8,
            LogicalButton::RightShoulder => 9,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// camelCase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalButton::MoveUp => "moveUp",
            LogicalButton::MoveDown => "moveDown",
            LogicalButton::MoveLeft => "moveLeft",
            LogicalButton::MoveRight => "moveRight",
            LogicalButton::RotateCw => "rotateCw",
            LogicalButton::RotateCcw => "rotateCcw",
            LogicalButton::Start => "start",
            LogicalButton::Back => "back",
            LogicalButton::LeftShoulder => "leftShoulder",
            LogicalButton::RightShoulder => "rightShoulder",
        }
    }
}

/// Per-tick state of one logical button
///
/// `half_transition_count` counts every flip of `ended_down` inside the tick
/// window. `allow_press` is only consulted for level-state sources (pad
/// buttons and stick-synthesized directions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub ended_down: bool,
    pub half_transition_count: u32,
    pub allow_press: bool,
}

impl ButtonState {
    pub const fn new() -> Self {
        Self {
            ended_down: false,
            half_transition_count: 0,
            allow_press: true,
        }
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}
