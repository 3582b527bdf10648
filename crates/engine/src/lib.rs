//! Engine module - the fixed-tick loop driver
//!
//! Ties the core model and the input resolver to a clock:
//!
//! - [`clock`]: monotonic counter abstraction (`SystemClock`, `ManualClock`)
//! - [`scheduler`]: frame pacing at half the display refresh and the gravity cadence
//! - [`session`]: the per-tick context (`step`, `finish_tick`) and render state
//! - [`config`]: JSON-loadable overrides for the defaults in `tick-tetris-types`
//!
//! # Loop shape
//!
//! ```
//! use tick_tetris_engine::{ManualClock, Session, SessionConfig};
//! use tick_tetris_core::FixedSequence;
//! use tick_tetris_types::PieceKind;
//!
//! let mut session = Session::new(
//!     SessionConfig::default(),
//!     ManualClock::new(),
//!     FixedSequence::new([PieceKind::T]),
//! )
//! .unwrap();
//!
//! for _ in 0..3 {
//!     if !session.is_running() {
//!         break;
//!     }
//!     let _outcome = session.step(&[], &[]);
//!     // present session.render_state() here
//!     let report = session.finish_tick();
//!     assert!(!report.missed_deadline);
//! }
//! ```

pub mod clock;
pub mod config;
pub mod scheduler;
pub mod session;

pub use tick_tetris_core as core;
pub use tick_tetris_input as input;
pub use tick_tetris_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, SessionConfig};
pub use scheduler::{tick_rate_hz, FrameScheduler, GravityTimer, TickReport};
pub use session::{RenderState, Session, SessionStats, TickOutcome};
