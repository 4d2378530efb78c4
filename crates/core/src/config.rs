//! Game configuration and construction errors.
//!
//! Gameplay itself never fails; everything that can go wrong happens while
//! building a game (bad board size, bad shape table, bad binding table, bad
//! JSON). Those failures are reported as [`ConfigError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::types::{
    HoldPolicy, KeyCode, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DROP_QUANTUM_MS,
    MOVE_QUANTUM_MS, SOFT_DROP_BONUS_MS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board size {width}x{height} outside the supported range")]
    BoardSize { width: u8, height: u8 },

    #[error("expected {expected} board cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("{0} must be greater than zero")]
    ZeroQuantum(&'static str),

    #[error("shape {0:?} must have 9 or 16 cells")]
    ShapeLength(String),

    #[error("shape {0:?} may only contain '0' and '1'")]
    ShapeChar(String),

    #[error("shape {0:?} has no filled cells")]
    EmptyShape(String),

    #[error("piece {0:?} mixes 3x3 and 4x4 rotations")]
    MixedShapeSides(String),

    #[error("piece catalog is empty")]
    EmptyCatalog,

    #[error("piece catalog has {0} entries, more than color ids available")]
    CatalogTooLarge(usize),

    #[error("key code {0} is bound to more than one action")]
    DuplicateBinding(KeyCode),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    /// Input step interval
    pub move_quantum_ms: u32,
    /// Gravity step interval
    pub drop_quantum_ms: u32,
    /// Gravity time credited per input step while soft drop is held
    pub soft_drop_bonus_ms: u32,
    pub hold_policy: HoldPolicy,
    /// Seed for piece selection
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            move_quantum_ms: MOVE_QUANTUM_MS,
            drop_quantum_ms: DROP_QUANTUM_MS,
            soft_drop_bonus_ms: SOFT_DROP_BONUS_MS,
            hold_policy: HoldPolicy::default(),
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Default configuration with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::check_size(self.board_width, self.board_height)?;
        if self.move_quantum_ms == 0 {
            return Err(ConfigError::ZeroQuantum("move_quantum_ms"));
        }
        if self.drop_quantum_ms == 0 {
            return Err(ConfigError::ZeroQuantum("drop_quantum_ms"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
