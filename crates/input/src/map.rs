//! Key mapping from terminal events to host key codes.
//!
//! Codes follow the browser `keyCode` numbering: arrows are 37-40, space is
//! 32 and letters use their uppercase ASCII value. Letters are
//! case-insensitive, so `a` and `A` both map to 65.

use crossterm::event::{KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::KeyBindings;
use crate::types::{Action, KeyCode};

pub const KEY_BACKSPACE: KeyCode = 8;
pub const KEY_TAB: KeyCode = 9;
pub const KEY_ENTER: KeyCode = 13;
pub const KEY_ESCAPE: KeyCode = 27;
pub const KEY_SPACE: KeyCode = 32;
pub const KEY_LEFT: KeyCode = 37;
pub const KEY_UP: KeyCode = 38;
pub const KEY_RIGHT: KeyCode = 39;
pub const KEY_DOWN: KeyCode = 40;

/// Host keys, handled before the game sees them
pub const KEY_PAUSE: KeyCode = b'P' as KeyCode;
pub const KEY_QUIT: KeyCode = b'Q' as KeyCode;
pub const KEY_RESTART: KeyCode = b'R' as KeyCode;

/// Commands that belong to the host rather than the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    TogglePause,
    Restart,
}

/// Map a terminal key to a host key code.
pub fn key_code(key: &KeyEvent) -> Option<KeyCode> {
    match key.code {
        TermKey::Left => Some(KEY_LEFT),
        TermKey::Up => Some(KEY_UP),
        TermKey::Right => Some(KEY_RIGHT),
        TermKey::Down => Some(KEY_DOWN),
        TermKey::Enter => Some(KEY_ENTER),
        TermKey::Esc => Some(KEY_ESCAPE),
        TermKey::Tab => Some(KEY_TAB),
        TermKey::Backspace => Some(KEY_BACKSPACE),
        TermKey::Char(' ') => Some(KEY_SPACE),
        TermKey::Char(c) if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase() as KeyCode),
        _ => None,
    }
}

/// Arrows, WASD, space for hard drop and C for hold.
pub fn default_bindings() -> KeyBindings {
    KeyBindings::new()
        .with(Action::MoveLeft, KEY_LEFT)
        .with(Action::MoveLeft, b'A' as KeyCode)
        .with(Action::MoveRight, KEY_RIGHT)
        .with(Action::MoveRight, b'D' as KeyCode)
        .with(Action::Rotate, KEY_UP)
        .with(Action::Rotate, b'W' as KeyCode)
        .with(Action::SoftDrop, KEY_DOWN)
        .with(Action::SoftDrop, b'S' as KeyCode)
        .with(Action::HardDrop, KEY_SPACE)
        .with(Action::Hold, b'C' as KeyCode)
}

/// Check if key should quit the game.
pub fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, TermKey::Char('q') | TermKey::Char('Q'))
        || (key.code == TermKey::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Host command for a key press, if any. Releases and repeats are ignored.
pub fn host_command(key: &KeyEvent) -> Option<HostCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(key) {
        return Some(HostCommand::Quit);
    }
    match key_code(key)? {
        KEY_PAUSE => Some(HostCommand::TogglePause),
        KEY_RESTART => Some(HostCommand::Restart),
        _ => None,
    }
}
