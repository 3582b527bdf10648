//! Terminal host (default binary).
//!
//! Feeds crossterm key events into a [`Session`] and draws the grid as
//! characters. Set `TICK_TETRIS_CONFIG` to a JSON file to override the session
//! defaults, and `RUST_LOG` to enable logging to stderr.

use std::io::{self, Stdout, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{execute, queue};
use log::info;

use tick_tetris::core::{Grid, Piece, UniformPieces};
use tick_tetris::engine::{Clock, Session, SessionConfig, SystemClock};
use tick_tetris::input::{should_quit, KeyTransition};
use tick_tetris::types::GRID_WIDTH;

const CONFIG_ENV: &str = "TICK_TETRIS_CONFIG";

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut session = Session::with_system_clock(config, seed_from_time())?;

    let mut term = Terminal::enter()?;
    let result = run(&mut session, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn load_config() -> Result<SessionConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => SessionConfig::load(&path)
            .with_context(|| format!("loading {} from {}", CONFIG_ENV, path.to_string_lossy())),
        None => Ok(SessionConfig::default()),
    }
}

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(session: &mut Session<SystemClock, UniformPieces>, term: &mut Terminal) -> Result<()> {
    let mut keys: Vec<KeyTransition> = Vec::with_capacity(32);
    // Without release reporting every press is released on the following tick.
    let mut pending_releases: Vec<KeyTransition> = Vec::with_capacity(8);

    while session.is_running() {
        keys.clear();
        keys.append(&mut pending_releases);

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if should_quit(key) {
                session.request_exit();
                break;
            }

            let now = session.clock().now();
            match key.kind {
                KeyEventKind::Press => {
                    keys.push(KeyTransition::keyboard(key.code, true, now));
                    if !term.reports_releases {
                        pending_releases.push(KeyTransition::keyboard(key.code, false, now));
                    }
                }
                KeyEventKind::Release => keys.push(KeyTransition::keyboard(key.code, false, now)),
                KeyEventKind::Repeat => {}
            }
        }
        if !session.is_running() {
            break;
        }

        let outcome = session.step(&keys, &[]);
        if outcome.game_over {
            info!("new game");
        }

        let state = session.render_state();
        term.draw(state.grid, state.active, session.paused())?;
        session.finish_tick();
    }

    Ok(())
}

struct Terminal {
    out: Stdout,
    reports_releases: bool,
    frame: String,
}

impl Terminal {
    fn enter() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;

        let reports_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if reports_releases {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        Ok(Self {
            out,
            reports_releases,
            frame: String::with_capacity(64),
        })
    }

    fn exit(&mut self) -> Result<()> {
        if self.reports_releases {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn draw(&mut self, grid: &Grid, active: &Piece, paused: bool) -> Result<()> {
        let width = GRID_WIDTH as usize;
        let border = format!("+{}+", "-".repeat(width * 2));

        queue!(self.out, MoveTo(0, 0), Print(&border))?;
        for (y, row) in grid.rows().enumerate() {
            self.frame.clear();
            self.frame.push('|');
            for (x, cell) in row.iter().enumerate() {
                let is_active = active
                    .cells()
                    .iter()
                    .any(|p| p.x as usize == x && p.y as usize == y);
                let glyph = if is_active {
                    "[]"
                } else if cell.is_some() {
                    "##"
                } else {
                    " ."
                };
                self.frame.push_str(glyph);
            }
            self.frame.push('|');
            queue!(self.out, MoveTo(0, y as u16 + 1), Print(&self.frame))?;
        }

        let footer_row = grid.height() as u16 + 1;
        queue!(self.out, MoveTo(0, footer_row), Print(&border))?;
        let status = if paused { "PAUSED " } else { "       " };
        queue!(
            self.out,
            MoveTo(0, footer_row + 1),
            Print(status),
            Print("arrows/wasd move, x/z rotate, enter pause, esc quit")
        )?;
        self.out.flush()?;
        Ok(())
    }
}
