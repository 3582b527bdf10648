//! Session tests - the tick driver end to end on a manual clock

use std::time::Duration;

use crossterm::event::KeyCode;

use tick_tetris::core::{collides, in_bounds, FixedSequence, Piece, UniformPieces};
use tick_tetris::engine::{ManualClock, Session, SessionConfig};
use tick_tetris::input::pad::BACK;
use tick_tetris::input::{KeyTransition, PadState};
use tick_tetris::types::{PieceKind, GRID_HEIGHT};

type TestSession = Session<ManualClock, FixedSequence>;

fn no_gravity() -> SessionConfig {
    SessionConfig {
        move_update_interval_ms: 60_000,
        ..SessionConfig::default()
    }
}

fn fixed(kinds: &[PieceKind]) -> TestSession {
    Session::new(no_gravity(), ManualClock::new(), FixedSequence::new(kinds.to_vec())).unwrap()
}

/// Down and up inside one tick
fn tap(code: KeyCode) -> [KeyTransition; 2] {
    [
        KeyTransition::keyboard(code, true, 0),
        KeyTransition::keyboard(code, false, 0),
    ]
}

fn min_x(piece: &Piece) -> i8 {
    piece.cells().iter().map(|p| p.x).min().unwrap()
}

fn min_y(piece: &Piece) -> i8 {
    piece.cells().iter().map(|p| p.y).min().unwrap()
}

#[test]
fn test_o_pieces_fill_two_rows_and_clear() {
    let mut session = fixed(&[PieceKind::O]);
    // O spawns in columns 5-6; walk each piece to its column pair and drop it.
    let targets: [i8; 5] = [0, 2, 4, 6, 8];

    for (i, &target) in targets.iter().enumerate() {
        while min_x(session.active()) != target {
            let code = if min_x(session.active()) > target {
                KeyCode::Left
            } else {
                KeyCode::Right
            };
            let (outcome, _) = session.run_tick(&tap(code), &[]);
            assert!(!outcome.locked);
        }

        let (outcome, _) = session.run_tick(&tap(KeyCode::Up), &[]);
        assert!(outcome.locked);
        if i + 1 < targets.len() {
            assert_eq!(outcome.cleared_count, 0);
            assert_eq!(session.grid().occupied_count(), 4 * (i + 1));
        } else {
            assert_eq!(outcome.cleared_count, 2);
            assert_eq!(session.grid().occupied_count(), 0);
        }
    }

    assert_eq!(session.stats().lines_cleared, 2);
    assert_eq!(session.stats().pieces_locked, 5);
}

#[test]
fn test_stacking_to_the_top_resets_the_grid() {
    let mut session = fixed(&[PieceKind::O]);
    let drops = GRID_HEIGHT as usize / 2;

    for i in 0..drops {
        let (outcome, _) = session.run_tick(&tap(KeyCode::Up), &[]);
        assert!(outcome.locked);
        assert_eq!(outcome.game_over, i + 1 == drops, "drop {}", i);
    }

    assert_eq!(session.grid().occupied_count(), 0);
    assert_eq!(*session.active(), Piece::spawn(PieceKind::O));
    assert_eq!(session.stats().games_over, 1);
    assert!(session.is_running());
}

#[test]
fn test_held_down_drops_one_row_per_tick() {
    let mut session = fixed(&[PieceKind::T]);
    let start = min_y(session.active());

    session.run_tick(&[KeyTransition::keyboard(KeyCode::Down, true, 0)], &[]);
    session.run_tick(&[], &[]);
    session.run_tick(&[], &[]);
    assert_eq!(min_y(session.active()), start + 3);

    session.run_tick(&[KeyTransition::keyboard(KeyCode::Down, false, 0)], &[]);
    session.run_tick(&[], &[]);
    assert_eq!(min_y(session.active()), start + 3);
}

#[test]
fn test_gravity_follows_wall_time() {
    let config = SessionConfig {
        move_update_interval_ms: 100,
        ..SessionConfig::default()
    };
    let mut session =
        Session::new(config, ManualClock::new(), FixedSequence::new([PieceKind::I])).unwrap();
    let start = min_y(session.active());

    // One stalled tick owes several drops at once.
    session.clock().advance(Duration::from_millis(350));
    session.step(&[], &[]);
    assert_eq!(min_y(session.active()), start + 3);
}

#[test]
fn test_pause_freezes_gravity() {
    let config = SessionConfig {
        move_update_interval_ms: 100,
        ..SessionConfig::default()
    };
    let mut session =
        Session::new(config, ManualClock::new(), FixedSequence::new([PieceKind::I])).unwrap();
    let start = *session.active();

    let (outcome, _) = session.run_tick(&tap(KeyCode::Enter), &[]);
    assert!(outcome.paused);
    for _ in 0..20 {
        session.run_tick(&tap(KeyCode::Left), &[]);
    }
    assert_eq!(*session.active(), start);

    let (outcome, _) = session.run_tick(&tap(KeyCode::Enter), &[]);
    assert!(!outcome.paused);
    assert_eq!(*session.active(), start);
}

#[test]
fn test_back_on_pad_requests_exit() {
    let mut session = fixed(&[PieceKind::S]);
    let back = PadState {
        connected: true,
        digital_bits: BACK,
        ..PadState::default()
    };
    session.run_tick(&[], &[back]);
    assert!(!session.is_running());
}

#[test]
fn test_request_exit() {
    let mut session = fixed(&[PieceKind::S]);
    assert!(session.is_running());
    session.request_exit();
    assert!(!session.is_running());
}

#[test]
fn test_slow_tick_reports_missed_deadline() {
    let mut session = fixed(&[PieceKind::Z]);
    session.step(&[], &[]);
    session.clock().advance(Duration::from_millis(40));
    let report = session.finish_tick();
    assert!(report.missed_deadline);
    assert_eq!(session.scheduler().missed_deadlines(), 1);

    let (_, report) = session.run_tick(&[], &[]);
    assert!(!report.missed_deadline);
}

#[test]
fn test_render_state_matches_session() {
    let session = fixed(&[PieceKind::L]);
    let state = session.render_state();
    assert_eq!(state.active, session.active());
    assert_eq!(state.grid.occupied_count(), 0);
}

#[test]
fn test_invariants_hold_over_long_play() {
    let mut session =
        Session::new(SessionConfig::default(), ManualClock::new(), UniformPieces::new(99)).unwrap();
    let script = [
        KeyCode::Left,
        KeyCode::Char('x'),
        KeyCode::Right,
        KeyCode::Right,
        KeyCode::Char('z'),
        KeyCode::Left,
        KeyCode::Up,
    ];

    for tick in 0..3_000usize {
        let keys = if tick % 3 == 0 {
            tap(script[(tick / 3) % script.len()]).to_vec()
        } else {
            Vec::new()
        };
        session.run_tick(&keys, &[]);

        let state = session.render_state();
        assert!(in_bounds(state.active), "active piece out of bounds at tick {}", tick);
        assert!(!collides(state.grid, state.active), "overlap at tick {}", tick);
        assert!((0..GRID_HEIGHT as usize).all(|y| !state.grid.is_row_full(y)));
    }

    assert!(session.stats().pieces_locked > 0);
}
