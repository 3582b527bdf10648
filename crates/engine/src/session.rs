//! Session - the explicit context driven once per tick.
//!
//! A tick runs in strict order: resolve input, apply presses, apply gravity,
//! then (after the host has presented the frame) swap input buffers and pace.
//! On downward collision the piece is committed, full rows are cleared and the
//! next piece spawns; a spawn collision clears the grid and play continues.

use log::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, SessionConfig};
use crate::core::geometry::{drop_position, is_blocked, try_rotate, try_shift};
use crate::core::{clear_lines, Grid, Piece, PieceSource, Spawner, UniformPieces};
use crate::input::{InputResolver, KeyTransition, PadState};
use crate::scheduler::{FrameScheduler, GravityTimer, TickReport};
use crate::types::LogicalButton;

/// What the simulation step did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Rows removed this tick
    pub cleared_count: usize,
    /// A piece was committed to the grid
    pub locked: bool,
    /// A spawn collided; the grid was cleared and a new game started
    pub game_over: bool,
    pub paused: bool,
}

/// Running totals, mostly for hosts and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub pieces_locked: u64,
    pub lines_cleared: u64,
    pub games_over: u64,
}

/// Pixel-independent state for presenters
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub grid: &'a Grid,
    pub active: &'a Piece,
}

pub struct Session<C, S> {
    config: SessionConfig,
    clock: C,
    grid: Grid,
    active: Piece,
    spawner: Spawner<S>,
    input: InputResolver,
    scheduler: FrameScheduler,
    gravity: GravityTimer,
    running: bool,
    paused: bool,
    stats: SessionStats,
}

impl Session<SystemClock, UniformPieces> {
    /// Real clock and uniform pieces seeded from `config.seed` or `fallback_seed`
    pub fn with_system_clock(
        config: SessionConfig,
        fallback_seed: u32,
    ) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or(fallback_seed);
        Self::new(config, SystemClock::new(), UniformPieces::new(seed))
    }
}

impl<C: Clock, S: PieceSource> Session<C, S> {
    pub fn new(config: SessionConfig, clock: C, source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new();
        let mut spawner = Spawner::new(source);
        let active = spawner.spawn(&grid).piece;
        let scheduler = FrameScheduler::new(&clock, config.refresh_hz);
        let gravity = GravityTimer::new(&clock, config.move_update_interval());
        let input = InputResolver::with_config(config.input_config());

        debug!(
            "session started: {:.02}ms ticks, {}ms gravity",
            scheduler.target_tick_duration().as_secs_f64() * 1000.0,
            config.move_update_interval_ms
        );

        Ok(Self {
            config,
            clock,
            grid,
            active,
            spawner,
            input,
            scheduler,
            gravity,
            running: true,
            paused: false,
            stats: SessionStats::default(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn input(&self) -> &InputResolver {
        &self.input
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            grid: &self.grid,
            active: &self.active,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Stop after the current tick
    pub fn request_exit(&mut self) {
        self.running = false;
    }

    /// Resolve this tick's input and advance the simulation
    pub fn step(&mut self, keys: &[KeyTransition], pads: &[PadState]) -> TickOutcome {
        self.stats.ticks += 1;
        let mut outcome = TickOutcome::default();

        let frame = self.input.ingest(keys, pads);
        let pressed = frame.pressed_buttons();
        let soft_drop = frame.any_held(LogicalButton::MoveDown);

        if pressed.contains(&LogicalButton::Back) {
            info!("exit requested");
            self.running = false;
            return outcome;
        }

        if pressed.contains(&LogicalButton::Start) {
            self.paused = !self.paused;
            if !self.paused {
                self.gravity.reset(self.clock.now());
            }
            debug!("paused: {}", self.paused);
        }
        if self.paused {
            outcome.paused = true;
            return outcome;
        }

        for &button in &pressed {
            match button {
                LogicalButton::MoveLeft => self.shift_active(-1),
                LogicalButton::MoveRight => self.shift_active(1),
                LogicalButton::RotateCw => self.rotate_active(true),
                LogicalButton::RotateCcw => self.rotate_active(false),
                _ => {}
            }
        }

        // Hard drop lands after this tick's shifts and rotations.
        if pressed.contains(&LogicalButton::MoveUp) {
            self.active = drop_position(&self.grid, &self.active);
            self.lock_active(&mut outcome);
        } else if soft_drop {
            self.drop_active(&mut outcome);
        }

        let drops = self.gravity.due_drops(self.clock.now());
        for _ in 0..drops {
            if outcome.locked {
                break;
            }
            self.drop_active(&mut outcome);
        }

        debug_assert!(!is_blocked(&self.grid, &self.active));
        outcome
    }

    /// Close the tick: swap input buffers, then pace to the target
    pub fn finish_tick(&mut self) -> TickReport {
        self.input.swap();
        self.scheduler.end_tick(&self.clock)
    }

    /// `step` and `finish_tick` back to back, for hosts that do not present
    pub fn run_tick(
        &mut self,
        keys: &[KeyTransition],
        pads: &[PadState],
    ) -> (TickOutcome, TickReport) {
        let outcome = self.step(keys, pads);
        (outcome, self.finish_tick())
    }

    fn shift_active(&mut self, dx: i8) {
        if let Some(moved) = try_shift(&self.grid, &self.active, dx, 0) {
            self.active = moved;
        }
    }

    fn rotate_active(&mut self, clockwise: bool) {
        if let Some(rotated) = try_rotate(&self.grid, &self.active, clockwise) {
            self.active = rotated;
        }
    }

    fn drop_active(&mut self, outcome: &mut TickOutcome) {
        match try_shift(&self.grid, &self.active, 0, 1) {
            Some(dropped) => self.active = dropped,
            None => self.lock_active(outcome),
        }
    }

    fn lock_active(&mut self, outcome: &mut TickOutcome) {
        self.grid.commit(&self.active);
        let cleared = clear_lines(&mut self.grid);

        outcome.locked = true;
        outcome.cleared_count += cleared.cleared_count();
        self.stats.pieces_locked += 1;
        self.stats.lines_cleared += cleared.cleared_count() as u64;
        if !cleared.is_empty() {
            debug!("cleared rows {:?}", cleared.rows());
        }

        self.spawn_next(outcome);
    }

    fn spawn_next(&mut self, outcome: &mut TickOutcome) {
        let spawn = self.spawner.spawn(&self.grid);
        if !spawn.game_over {
            self.active = spawn.piece;
            return;
        }

        self.stats.games_over += 1;
        info!(
            "game over after {} pieces, {} lines",
            self.stats.pieces_locked, self.stats.lines_cleared
        );
        outcome.game_over = true;
        self.grid.clear();
        self.active = self.spawner.spawn(&self.grid).piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::core::FixedSequence;
    use crate::types::PieceKind;
    use crossterm::event::KeyCode;

    fn session(kinds: &[PieceKind]) -> Session<ManualClock, FixedSequence> {
        let config = SessionConfig {
            move_update_interval_ms: 10_000,
            ..SessionConfig::default()
        };
        Session::new(config, ManualClock::new(), FixedSequence::new(kinds.to_vec())).unwrap()
    }

    fn key(code: KeyCode, is_down: bool) -> KeyTransition {
        KeyTransition::keyboard(code, is_down, 0)
    }

    #[test]
    fn test_first_piece_spawns_at_anchor() {
        let s = session(&[PieceKind::T]);
        assert_eq!(*s.active(), Piece::spawn(PieceKind::T));
        assert!(s.is_running());
    }

    #[test]
    fn test_left_press_moves_once_while_held() {
        let mut s = session(&[PieceKind::O]);
        let start = *s.active();

        s.run_tick(&[key(KeyCode::Left, true)], &[]);
        assert_eq!(s.active().cells()[0].x, start.cells()[0].x - 1);

        s.run_tick(&[], &[]);
        assert_eq!(s.active().cells()[0].x, start.cells()[0].x - 1);
    }

    #[test]
    fn test_back_stops_session() {
        let mut s = session(&[PieceKind::O]);
        s.step(&[key(KeyCode::Esc, true)], &[]);
        assert!(!s.is_running());
    }

    #[test]
    fn test_start_toggles_pause() {
        let mut s = session(&[PieceKind::O]);
        let outcome = s.step(&[key(KeyCode::Enter, true)], &[]);
        assert!(outcome.paused);
        assert!(s.paused());
        s.finish_tick();

        s.step(&[key(KeyCode::Enter, false)], &[]);
        s.finish_tick();
        let outcome = s.step(&[key(KeyCode::Enter, true)], &[]);
        assert!(!outcome.paused);
        assert!(!s.paused());
    }

    #[test]
    fn test_hard_drop_locks_and_spawns_next() {
        let mut s = session(&[PieceKind::O, PieceKind::I]);
        let outcome = s.step(&[key(KeyCode::Up, true)], &[]);

        assert!(outcome.locked);
        assert_eq!(s.grid().occupied_count(), 4);
        assert_eq!(s.active().kind(), PieceKind::I);
        assert_eq!(s.stats().pieces_locked, 1);
    }
}
