//! Game state module - the single update/render entry point
//!
//! This module ties together the board, the piece catalog, the input state
//! machine and the two fixed-step timers.
//!
//! # Timing
//!
//! `update(delta_ms)` feeds both accumulators and drains them in whole steps,
//! so a long frame runs several steps and the outcome does not depend on the
//! frame rate:
//!
//! - **Move step** (`move_quantum_ms`, 100ms): hold, hard drop, shifts with
//!   delayed auto-repeat, rotation, soft drop. The piece change of one step is
//!   atomic: if the result is invalid the piece reverts to its pre-step copy.
//! - **Gravity step** (`drop_quantum_ms`, 1000ms): one row down; if that is
//!   blocked the piece locks, the next piece spawns and the gravity
//!   accumulator is zeroed.

use tracing::{debug, info};

use crate::bindings::KeyBindings;
use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::ghost::drop_to_rest;
use crate::input::InputState;
use crate::piece::PieceInstance;
use crate::pieces::PieceCatalog;
use crate::render::{FrameInfo, Layer, Surface};
use crate::rng::SimpleRng;
use crate::types::{Action, GameStatus, HoldPolicy, KeyCode, EMPTY};

/// Emitted every time a piece locks (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub rows_cleared: usize,
    pub hard_drop: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    catalog: PieceCatalog,
    rng: SimpleRng,
    board: Board,
    current: PieceInstance,
    next: PieceInstance,
    hold: Option<PieceInstance>,
    /// Absent when the current piece is not at a valid location.
    ghost: Option<PieceInstance>,
    input: InputState,
    move_timer_ms: u32,
    drop_timer_ms: u32,
    status: GameStatus,
    /// A hold swap happened since the last lock.
    hold_used: bool,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Default 10x20 game with the given seed and no key bindings
    pub fn new(seed: u32) -> Self {
        Self::build(
            GameConfig::with_seed(seed),
            PieceCatalog::standard(),
            Board::default(),
            InputState::default(),
        )
    }

    pub fn with_config(config: GameConfig, bindings: KeyBindings) -> Result<Self, ConfigError> {
        Self::with_catalog(config, bindings, PieceCatalog::standard())
    }

    pub fn with_catalog(
        config: GameConfig,
        bindings: KeyBindings,
        catalog: PieceCatalog,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        bindings.validate()?;
        let board = Board::new(config.board_width, config.board_height)?;
        Ok(Self::build(config, catalog, board, InputState::new(bindings)))
    }

    /// Start from a prepared board. The board's size overrides the config's.
    pub fn with_board(
        mut config: GameConfig,
        bindings: KeyBindings,
        board: Board,
    ) -> Result<Self, ConfigError> {
        config.board_width = board.width();
        config.board_height = board.height();
        config.validate()?;
        bindings.validate()?;
        Ok(Self::build(
            config,
            PieceCatalog::standard(),
            board,
            InputState::new(bindings),
        ))
    }

    fn build(config: GameConfig, catalog: PieceCatalog, board: Board, input: InputState) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let width = board.width();
        let current = catalog.random(&mut rng, width);
        let next = catalog.random(&mut rng, width);

        let mut game = Self {
            config,
            catalog,
            rng,
            board,
            current,
            next,
            hold: None,
            ghost: None,
            input,
            move_timer_ms: 0,
            drop_timer_ms: 0,
            status: GameStatus::Playing,
            hold_used: false,
            pieces_locked: 0,
            last_event: None,
        };
        game.settle_spawn();
        game
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &PieceInstance {
        &self.current
    }

    pub fn next(&self) -> &PieceInstance {
        &self.next
    }

    pub fn hold(&self) -> Option<&PieceInstance> {
        self.hold.as_ref()
    }

    pub fn ghost(&self) -> Option<&PieceInstance> {
        self.ghost.as_ref()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn move_timer_ms(&self) -> u32 {
        self.move_timer_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Whether the host should route `code` to this game.
    pub fn capture_key(&self, code: KeyCode) -> bool {
        self.input.capture_key(code)
    }

    pub fn key_pressed(&mut self, code: KeyCode) -> bool {
        self.input.key_pressed(code)
    }

    pub fn key_released(&mut self, code: KeyCode) -> bool {
        self.input.key_released(code)
    }

    /// Press an action directly, bypassing the binding table
    pub fn press_action(&mut self, action: Action) {
        self.input.press(action);
    }

    pub fn release_action(&mut self, action: Action) {
        self.input.release(action);
    }

    /// Toggle between playing and paused. No effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver => GameStatus::GameOver,
        };
    }

    /// Start over on an empty board. Config, catalog and bindings are kept;
    /// the piece stream continues from the current RNG state.
    pub fn restart(&mut self) {
        let mut config = self.config.clone();
        config.seed = self.rng.state();
        let mut board = self.board.clone();
        board.clear();
        let mut input = self.input.clone();
        input.reset();

        debug!(seed = config.seed, "restarting game");
        *self = Self::build(config, self.catalog.clone(), board, input);
    }

    /// Advance the simulation by `delta_ms`. No-op unless playing.
    pub fn update(&mut self, delta_ms: u32) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.move_timer_ms = self.move_timer_ms.saturating_add(delta_ms);
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta_ms);

        while self.move_timer_ms >= self.config.move_quantum_ms {
            self.move_timer_ms -= self.config.move_quantum_ms;
            self.move_step();
            if self.is_game_over() {
                return;
            }
        }

        while self.drop_timer_ms >= self.config.drop_quantum_ms {
            self.drop_timer_ms -= self.config.drop_quantum_ms;
            self.gravity_step();
            if self.is_game_over() {
                return;
            }
        }
    }

    /// One input step.
    ///
    /// A hard drop ends the step without aging held keys: a shift or rotate
    /// pressed in the same step still sees state 1 and acts on the next piece.
    fn move_step(&mut self) {
        if self.input.fire_once(Action::Hold) {
            self.hold_current();
        }

        if self.input.fire_once(Action::HardDrop) {
            self.hard_drop();
            return;
        }

        let before = self.current;
        let mut changed = false;

        if self.input.should_shift(Action::MoveLeft) {
            self.current.x -= 1;
            changed = true;
        }
        if self.input.should_shift(Action::MoveRight) {
            self.current.x += 1;
            changed = true;
        }
        if self.input.fire_once(Action::Rotate) {
            self.current.rotate_cw();
            changed = true;
        }

        if changed {
            if self.board.fit_piece(&mut self.current) {
                self.refresh_ghost();
            } else {
                self.current = before;
            }
        }

        if self.input.is_held(Action::SoftDrop) {
            self.drop_timer_ms = self
                .drop_timer_ms
                .saturating_add(self.config.soft_drop_bonus_ms);
        }

        self.input.advance_tick();
    }

    /// One gravity step.
    fn gravity_step(&mut self) {
        self.current.y += 1;
        if self.board.is_location_valid(&self.current) {
            return;
        }
        self.current.y -= 1;
        self.lock_current(false);
    }

    /// Drop the current piece to its resting row and lock it.
    pub(crate) fn hard_drop(&mut self) {
        if let Some(rest) = drop_to_rest(&self.board, &self.current) {
            self.current = rest;
        }
        self.lock_current(true);
    }

    /// Swap the current piece with the hold slot.
    ///
    /// The first hold takes the incoming piece from `next` and refills `next`.
    /// If the incoming piece cannot be placed at the spawn location the swap
    /// is undone and the current piece keeps falling.
    fn hold_current(&mut self) -> bool {
        if self.config.hold_policy == HoldPolicy::OncePerPiece && self.hold_used {
            debug!("hold rejected: already used for this piece");
            return false;
        }

        let saved_next = self.next;
        let width = self.board.width();
        let mut incoming = match self.hold {
            Some(held) => held,
            None => {
                let promoted = self.next;
                self.next = self.catalog.random(&mut self.rng, width);
                promoted
            }
        };

        incoming.init_position(width);
        if !self.board.fit_piece(&mut incoming) {
            self.next = saved_next;
            debug!(kind = incoming.kind, "hold rejected: incoming piece does not fit");
            return false;
        }

        debug!(held = self.current.kind, incoming = incoming.kind, "hold swap");
        self.hold = Some(self.current);
        self.current = incoming;
        self.hold_used = true;
        self.refresh_ghost();
        true
    }

    /// Merge the current piece into the board and bring in the next one.
    fn lock_current(&mut self, hard_drop: bool) {
        let rows_cleared = self.board.place_piece(&self.current);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.last_event = Some(LockEvent {
            rows_cleared,
            hard_drop,
        });
        debug!(
            kind = self.current.kind,
            x = self.current.x,
            y = self.current.y,
            rows_cleared,
            hard_drop,
            "piece locked"
        );

        self.drop_timer_ms = 0;
        self.hold_used = false;

        let width = self.board.width();
        self.current = self.next;
        self.current.init_position(width);
        self.next = self.catalog.random(&mut self.rng, width);
        self.settle_spawn();
    }

    /// Clamp a freshly promoted piece; a piece that still does not fit ends the game.
    fn settle_spawn(&mut self) -> bool {
        if self.board.fit_piece(&mut self.current) {
            self.refresh_ghost();
            return true;
        }

        self.ghost = None;
        self.status = GameStatus::GameOver;
        info!(
            kind = self.current.kind,
            pieces_locked = self.pieces_locked,
            "game over: spawn location blocked"
        );
        false
    }

    fn refresh_ghost(&mut self) {
        self.ghost = drop_to_rest(&self.board, &self.current);
    }

    /// Report every visible cell to `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.begin_frame(FrameInfo {
            board_width: self.board.width(),
            board_height: self.board.height(),
            status: self.status,
        });

        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                let color = self.board.cell_at(x, y);
                if color != EMPTY {
                    surface.draw_cell(Layer::Board, x as i8, y as i8, color);
                }
            }
        }

        if let Some(ghost) = &self.ghost {
            for (x, y) in ghost.board_cells() {
                surface.draw_cell(Layer::Ghost, x, y, ghost.color);
            }
        }

        for (x, y) in self.current.board_cells().filter(|&(_, y)| y >= 0) {
            surface.draw_cell(Layer::Current, x, y, self.current.color);
        }

        for (x, y) in self.next.cells() {
            surface.draw_cell(Layer::Next, x, y, self.next.color);
        }

        if let Some(hold) = &self.hold {
            for (x, y) in hold.cells() {
                surface.draw_cell(Layer::Hold, x, y, hold.color);
            }
        }

        surface.end_frame();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
