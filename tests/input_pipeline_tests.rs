//! Host input pipeline: terminal events -> key codes -> release emulation -> game

use crossterm::event::{KeyCode as TermKey, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use stackfall::core::{GameConfig, GameState};
use stackfall::input::{default_bindings, host_command, key_code, HostCommand, ReleaseTracker};
use stackfall::types::{Action, GameStatus};

fn event(code: TermKey, kind: KeyEventKind) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    }
}

/// Minimal host: what the binary does for one key event.
struct Host {
    game: GameState,
    releases: ReleaseTracker,
    now_ms: u64,
}

impl Host {
    fn new() -> Self {
        let config = GameConfig {
            board_width: 16,
            board_height: 32,
            ..GameConfig::with_seed(21)
        };
        Self {
            game: GameState::with_config(config, default_bindings()).unwrap(),
            releases: ReleaseTracker::new(),
            now_ms: 0,
        }
    }

    fn key(&mut self, key: KeyEvent) {
        if let Some(command) = host_command(&key) {
            match command {
                HostCommand::TogglePause => self.game.toggle_pause(),
                HostCommand::Restart => self.game.restart(),
                HostCommand::Quit => {}
            }
            return;
        }
        let Some(code) = key_code(&key) else {
            return;
        };
        if !self.game.capture_key(code) {
            return;
        }
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.releases.press(code, self.now_ms) {
                    self.game.key_pressed(code);
                }
            }
            KeyEventKind::Release => {
                self.releases.release(code);
                self.game.key_released(code);
            }
        }
    }

    fn frame(&mut self, ms: u32) {
        self.now_ms += ms as u64;
        for code in self.releases.expire(self.now_ms) {
            self.game.key_released(code);
        }
        self.game.update(ms);
    }
}

#[test]
fn test_terminal_repeats_do_not_restart_repeat_delay() {
    let mut host = Host::new();
    let start_x = host.game.current().x;

    // A terminal without release events: a press, then auto-repeat presses.
    host.key(event(TermKey::Left, KeyEventKind::Press));
    for _ in 0..10 {
        host.frame(50);
        host.key(event(TermKey::Left, KeyEventKind::Press));
    }

    // 500ms held: shift, pause, then three repeats.
    assert_eq!(host.game.current().x, start_x - 4);
}

#[test]
fn test_tap_without_release_event_times_out() {
    let mut host = Host::new();
    host.key(event(TermKey::Char(' '), KeyEventKind::Press));
    host.frame(100);
    assert_eq!(host.game.pieces_locked(), 1);

    // No release arrives; after the timeout the key can fire again.
    host.frame(100);
    host.frame(100);
    assert_eq!(host.game.input().state(Action::HardDrop), 0);

    host.key(event(TermKey::Char(' '), KeyEventKind::Press));
    host.frame(100);
    assert_eq!(host.game.pieces_locked(), 2);
}

#[test]
fn test_real_release_events_are_used() {
    let mut host = Host::new();
    let start_x = host.game.current().x;

    host.key(event(TermKey::Char('a'), KeyEventKind::Press));
    host.frame(100);
    host.key(event(TermKey::Char('a'), KeyEventKind::Release));
    host.frame(100);
    assert_eq!(host.game.current().x, start_x - 1);

    // Once releases have been seen, a held key no longer times out.
    host.key(event(TermKey::Char('d'), KeyEventKind::Press));
    host.frame(400);
    assert!(host.game.input().is_held(Action::MoveRight));
}

#[test]
fn test_host_keys_bypass_game() {
    let mut host = Host::new();
    host.key(event(TermKey::Char('p'), KeyEventKind::Press));
    assert_eq!(host.game.status(), GameStatus::Paused);

    let y = host.game.current().y;
    host.frame(5000);
    assert_eq!(host.game.current().y, y);

    host.key(event(TermKey::Char('p'), KeyEventKind::Release));
    host.key(event(TermKey::Char('P'), KeyEventKind::Press));
    host.frame(1000);
    assert_eq!(host.game.current().y, y + 1);
}

#[test]
fn test_unbound_keys_ignored() {
    let mut host = Host::new();
    let before = *host.game.current();
    host.key(event(TermKey::Char('x'), KeyEventKind::Press));
    host.key(event(TermKey::F(5), KeyEventKind::Press));
    host.frame(100);
    assert_eq!(host.game.current(), &before);
}
