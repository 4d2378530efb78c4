//! Shared types and constants for the falling-block rules engine.
//!
//! Everything here is plain data: no game logic, no I/O. The core, the input
//! layer and the terminal renderer all agree on these definitions.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Boards may be configured
//! anywhere between [`MIN_BOARD_SIDE`] and [`MAX_BOARD_SIDE`] on each axis.
//! Coordinates are `(x, y)` with `x` growing to the right and `y` growing down;
//! row 0 is the top of the board.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_QUANTUM_MS` | 100 | Input step: shifts, rotation, hold, hard drop |
//! | `DROP_QUANTUM_MS` | 1000 | Gravity step: one row down |
//! | `SOFT_DROP_BONUS_MS` | 1000 | Added to the gravity accumulator per held soft-drop step |
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{Action, GameStatus, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
//! assert!(Action::HardDrop.is_one_shot());
//! assert!(!GameStatus::Playing.is_terminal());
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u8 = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board side; the widest piece spans 4 cells.
pub const MIN_BOARD_SIDE: u8 = 4;

/// Largest accepted board side (keeps piece coordinates inside `i8`).
pub const MAX_BOARD_SIDE: u8 = 64;

/// Input step interval in milliseconds
pub const MOVE_QUANTUM_MS: u32 = 100;

/// Gravity step interval in milliseconds
pub const DROP_QUANTUM_MS: u32 = 1000;

/// Gravity time credited per move step while soft drop is held
pub const SOFT_DROP_BONUS_MS: u32 = 1000;

/// Row a freshly drawn piece is anchored at before clamping
pub const SPAWN_Y: i8 = -1;

/// Number of pre-rotated orientations per piece
pub const ROTATION_COUNT: u8 = 4;

/// Color identifier stored in board cells. `EMPTY` (0) means no block.
pub type ColorId = u8;

/// The empty cell value
pub const EMPTY: ColorId = 0;

/// Host/platform key code.
///
/// The core never interprets these values; it only looks them up in a
/// binding table supplied by the host.
pub type KeyCode = u32;

/// Player actions tracked by the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Shift the current piece one column left
    MoveLeft,
    /// Shift the current piece one column right
    MoveRight,
    /// Rotate the current piece clockwise (fires once per press)
    Rotate,
    /// Accelerate gravity while held
    SoftDrop,
    /// Drop the current piece to its resting row and lock it (fires once per press)
    HardDrop,
    /// Swap the current piece with the hold slot (fires once per press)
    Hold,
}

impl Action {
    /// Number of tracked actions
    pub const COUNT: usize = 6;

    /// All actions in index order
    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Rotate,
        Action::SoftDrop,
        Action::HardDrop,
        Action::Hold,
    ];

    /// Dense index into per-action tables
    pub const fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Rotate => 2,
            Action::SoftDrop => 3,
            Action::HardDrop => 4,
            Action::Hold => 5,
        }
    }

    /// One-shot actions fire once and then wait for the key to be released.
    pub const fn is_one_shot(self) -> bool {
        matches!(self, Action::Rotate | Action::HardDrop | Action::Hold)
    }

    /// Parse an action name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::Action;
    ///
    /// assert_eq!(Action::from_str("softdrop"), Some(Action::SoftDrop));
    /// assert_eq!(Action::from_str("HOLD"), Some(Action::Hold));
    /// assert_eq!(Action::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "rotate" => Some(Action::Rotate),
            "softdrop" => Some(Action::SoftDrop),
            "harddrop" => Some(Action::HardDrop),
            "hold" => Some(Action::Hold),
            _ => None,
        }
    }

    /// camelCase name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::Rotate => "rotate",
            Action::SoftDrop => "softDrop",
            Action::HardDrop => "hardDrop",
            Action::Hold => "hold",
        }
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Paused,
    /// A new piece could not be placed. Terminal: updates become no-ops.
    GameOver,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// How often the hold slot may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldPolicy {
    /// Swap as often as you like before the piece locks.
    #[default]
    Unlimited,
    /// One swap per piece; re-armed when a piece locks.
    OncePerPiece,
}
