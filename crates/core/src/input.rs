//! Per-action key state machine.
//!
//! Every action carries one integer state:
//!
//! | State | Meaning |
//! |-------|---------|
//! | `0` | released |
//! | `1` | pressed, not yet seen by a move step |
//! | `n >= 2` | held through `n` move steps |
//! | `-1` | one-shot action already fired; waits for release |
//!
//! ```text
//! shift / soft drop:  0 --press--> 1 --step--> 2 (pause) --step--> 3.. (repeat) --release--> 0
//! one-shot actions:   0 --press--> 1 --step--> -1 (fired) --release--> 0
//! ```
//!
//! Presses and releases may arrive at any time between updates; they only
//! change these flags, and several presses before one update collapse into
//! the same state. The game consumes the states inside its move step.

use crate::bindings::KeyBindings;
use crate::types::{Action, KeyCode};

/// State of an action whose one-shot has fired and is awaiting release
pub const CONSUMED: i32 = -1;

/// Key state for every action, plus the host's binding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    states: [i32; Action::COUNT],
    bindings: KeyBindings,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            states: [0; Action::COUNT],
            bindings,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Whether `code` is bound to an action.
    ///
    /// Hosts use this to decide whether to suppress the key's default behavior.
    pub fn capture_key(&self, code: KeyCode) -> bool {
        self.bindings.action_for(code).is_some()
    }

    /// Key-down for a host code. Returns false when the code is unbound.
    pub fn key_pressed(&mut self, code: KeyCode) -> bool {
        match self.bindings.action_for(code) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Key-up for a host code. Returns false when the code is unbound.
    pub fn key_released(&mut self, code: KeyCode) -> bool {
        match self.bindings.action_for(code) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    /// Mark `action` as just pressed, unless it is waiting for a release.
    pub fn press(&mut self, action: Action) {
        let state = &mut self.states[action.index()];
        if *state != CONSUMED {
            *state = 1;
        }
    }

    pub fn release(&mut self, action: Action) {
        self.states[action.index()] = 0;
    }

    pub fn state(&self, action: Action) -> i32 {
        self.states[action.index()]
    }

    /// Pressed or held (consumed one-shots excluded)
    pub fn is_held(&self, action: Action) -> bool {
        self.state(action) >= 1
    }

    /// Delayed auto-repeat: shift on the first step, pause one step, then
    /// shift on every following step.
    pub fn should_shift(&self, action: Action) -> bool {
        let state = self.state(action);
        state == 1 || state >= 3
    }

    /// Fire a one-shot action if it was just pressed, marking it consumed.
    pub fn fire_once(&mut self, action: Action) -> bool {
        let state = &mut self.states[action.index()];
        if *state == 1 {
            *state = CONSUMED;
            true
        } else {
            false
        }
    }

    /// End of a move step: held repeatable actions age by one step.
    pub fn advance_tick(&mut self) {
        for action in Action::ALL {
            if action.is_one_shot() {
                continue;
            }
            let state = &mut self.states[action.index()];
            if *state >= 1 {
                *state = state.saturating_add(1);
            }
        }
    }

    /// Release everything (bindings are kept).
    pub fn reset(&mut self) {
        self.states = [0; Action::COUNT];
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
