//! Terminal runner (default binary).
//!
//! Reads crossterm events, routes bound keys into the game, advances it with
//! real elapsed time and paints it through the framebuffer renderer.
//!
//! Environment:
//! - `STACKFALL_CONFIG`: JSON host config (board size, timings, bindings)
//! - `STACKFALL_LOG`: file to write debug logs to (stdout belongs to the game)

use std::fs::File;
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, info};

use stackfall::core::{Clock, FrameTimer, GameState, SystemClock};
use stackfall::input::{host_command, key_code, HostCommand, HostConfig, ReleaseTracker};
use stackfall::term::{GameView, TerminalRenderer, Viewport};

const LOG_ENV_VAR: &str = "STACKFALL_LOG";
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;

    let config = HostConfig::from_env()?;
    let game = GameState::with_config(config.game.clone(), config.bindings.clone())
        .context("build game from config")?;
    info!(
        width = config.game.board_width,
        height = config.game.board_height,
        seed = config.game.seed,
        "starting game"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV_VAR) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("create log file {}", Path::new(&path).display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let mut view = GameView::default();
    let mut releases = ReleaseTracker::new();
    let mut timer = FrameTimer::new(SystemClock::new());
    let mut next_frame = Instant::now();

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    let now_ms = timer.clock().now_ms();
                    if handle_key(&mut game, &mut releases, &key, now_ms).is_break() {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            if Instant::now() < next_frame {
                continue;
            }
        }

        next_frame = Instant::now() + FRAME;

        for code in releases.expire(timer.clock().now_ms()) {
            game.key_released(code);
        }
        game.update(timer.delta_ms());

        if let Some(lock) = game.take_last_event() {
            if lock.rows_cleared > 0 {
                debug!(rows = lock.rows_cleared, "rows cleared");
            }
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.set_viewport(Viewport::new(w, h));
        game.render(&mut view);
        term.draw_swap(view.framebuffer_mut())?;
    }
}

/// Route one key event. Breaks when the player quits.
fn handle_key(
    game: &mut GameState,
    releases: &mut ReleaseTracker,
    key: &KeyEvent,
    now_ms: u64,
) -> ControlFlow<()> {
    if let Some(command) = host_command(key) {
        match command {
            HostCommand::Quit => return ControlFlow::Break(()),
            HostCommand::TogglePause => game.toggle_pause(),
            HostCommand::Restart => {
                releases.reset();
                game.restart();
            }
        }
        return ControlFlow::Continue(());
    }

    let Some(code) = key_code(key) else {
        return ControlFlow::Continue(());
    };
    if !game.capture_key(code) {
        return ControlFlow::Continue(());
    }

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            if releases.press(code, now_ms) {
                game.key_pressed(code);
            }
        }
        KeyEventKind::Release => {
            releases.release(code);
            game.key_released(code);
        }
    }
    ControlFlow::Continue(())
}
