//! Host configuration: game tunables plus the key binding table.
//!
//! Loaded from a JSON file whose path is taken from `STACKFALL_CONFIG`. Every
//! field is optional:
//!
//! ```json
//! {
//!   "game": { "board_width": 16, "board_height": 32, "hold_policy": "once_per_piece" },
//!   "bindings": { "hard_drop": [32, 13] }
//! }
//! ```
//!
//! A `bindings` object replaces the whole default table; actions it omits are
//! left unbound.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{GameConfig, KeyBindings};
use crate::map::{default_bindings, KEY_PAUSE, KEY_QUIT, KEY_RESTART};

/// Environment variable holding the config file path
pub const CONFIG_ENV_VAR: &str = "STACKFALL_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub game: GameConfig,
    pub bindings: KeyBindings,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            bindings: default_bindings(),
        }
    }
}

impl HostConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse host config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("load config file {}", path.display()))
    }

    /// Load from `STACKFALL_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                debug!(path = ?path, "loading host config");
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        self.bindings.validate()?;
        for code in [KEY_PAUSE, KEY_QUIT, KEY_RESTART] {
            if let Some(action) = self.bindings.action_for(code) {
                warn!(code, action = action.as_str(), "binding shadowed by a host key");
            }
        }
        Ok(())
    }
}
