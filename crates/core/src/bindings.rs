//! Action-to-key-code binding table.
//!
//! The table belongs to the host: the core ships an empty default and only
//! ever asks "which action, if any, is this code bound to?".

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::types::{Action, KeyCode};

/// Key codes per action. A code may be bound to at most one action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub hold: Vec<KeyCode>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `bind`
    pub fn with(mut self, action: Action, code: KeyCode) -> Self {
        self.bind(action, code);
        self
    }

    /// Bind `code` to `action`, removing it from any other action first.
    pub fn bind(&mut self, action: Action, code: KeyCode) {
        for other in Action::ALL {
            self.codes_mut(other).retain(|&c| c != code);
        }
        self.codes_mut(action).push(code);
    }

    pub fn codes_for(&self, action: Action) -> &[KeyCode] {
        match action {
            Action::MoveLeft => &self.move_left,
            Action::MoveRight => &self.move_right,
            Action::Rotate => &self.rotate,
            Action::SoftDrop => &self.soft_drop,
            Action::HardDrop => &self.hard_drop,
            Action::Hold => &self.hold,
        }
    }

    fn codes_mut(&mut self, action: Action) -> &mut Vec<KeyCode> {
        match action {
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::Rotate => &mut self.rotate,
            Action::SoftDrop => &mut self.soft_drop,
            Action::HardDrop => &mut self.hard_drop,
            Action::Hold => &mut self.hold,
        }
    }

    /// Action bound to `code`
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.codes_for(action).contains(&code))
    }

    /// Reject tables that bind one code to several actions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<KeyCode> = Vec::new();
        for action in Action::ALL {
            for &code in self.codes_for(action) {
                if seen.contains(&code) {
                    return Err(ConfigError::DuplicateBinding(code));
                }
                seen.push(code);
            }
        }
        Ok(())
    }
}
