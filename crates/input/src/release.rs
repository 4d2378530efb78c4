//! Key-release emulation for terminal environments.
//!
//! Many terminals only report presses: holding a key produces a stream of
//! repeated presses and no release at the end. The game's input state needs a
//! press when a key goes down and a release when it comes up, so this tracker
//! sits between the terminal and the game:
//!
//! - the first press of a code is forwarded; later presses of a held code
//!   only refresh its timestamp, so held-key repeat stays with the game
//! - a held code with no press for `timeout_ms` is released
//! - once the terminal has sent one real release event, timeouts are
//!   disabled and releases come from the terminal only

use arrayvec::ArrayVec;

use crate::types::KeyCode;

/// Upper bound on simultaneously tracked codes
pub const MAX_HELD_KEYS: usize = 16;

// Short enough that a tap does not turn into a sustained hold, long enough to
// cover the gap before the terminal's own key repeat starts.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    code: KeyCode,
    last_seen_ms: u64,
}

/// Tracks held codes and synthesizes releases.
#[derive(Debug, Clone)]
pub struct ReleaseTracker {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    timeout_ms: u64,
    release_events_seen: bool,
}

impl ReleaseTracker {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Whether the terminal has proven it reports releases.
    pub fn release_events_seen(&self) -> bool {
        self.release_events_seen
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.iter().any(|k| k.code == code)
    }

    /// Record a press (or terminal repeat) of `code`.
    ///
    /// Returns true when the press is new and should reach the game.
    pub fn press(&mut self, code: KeyCode, now_ms: u64) -> bool {
        if let Some(key) = self.held.iter_mut().find(|k| k.code == code) {
            key.last_seen_ms = now_ms;
            return false;
        }

        // Untracked when full: the press still goes through, the release
        // has to come from the terminal.
        let _ = self.held.try_push(HeldKey {
            code,
            last_seen_ms: now_ms,
        });
        true
    }

    /// Record a real release event. Returns true if `code` was held.
    pub fn release(&mut self, code: KeyCode) -> bool {
        self.release_events_seen = true;
        self.forget(code)
    }

    /// Release every code that timed out, returning them.
    pub fn expire(&mut self, now_ms: u64) -> ArrayVec<KeyCode, MAX_HELD_KEYS> {
        let mut expired = ArrayVec::new();
        if self.release_events_seen {
            return expired;
        }

        let timeout_ms = self.timeout_ms;
        self.held.retain(|key| {
            if now_ms.saturating_sub(key.last_seen_ms) > timeout_ms {
                expired.push(key.code);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Forget every held code (e.g. after a restart).
    pub fn reset(&mut self) {
        self.held.clear();
    }

    fn forget(&mut self, code: KeyCode) -> bool {
        match self.held.iter().position(|k| k.code == code) {
            Some(i) => {
                self.held.remove(i);
                true
            }
            None => false,
        }
    }
}

impl Default for ReleaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_are_swallowed() {
        let mut tracker = ReleaseTracker::new();
        assert!(tracker.press(37, 0));
        assert!(!tracker.press(37, 30));
        assert!(!tracker.press(37, 60));
        assert!(tracker.is_held(37));
    }

    #[test]
    fn test_tap_auto_releases_after_timeout() {
        let mut tracker = ReleaseTracker::new();
        tracker.press(32, 1000);

        assert!(tracker.expire(1150).is_empty());
        assert_eq!(tracker.expire(1151).as_slice(), &[32]);
        assert!(!tracker.is_held(32));

        // A fresh press after the release is forwarded again.
        assert!(tracker.press(32, 1200));
    }

    #[test]
    fn test_repeat_refreshes_timeout() {
        let mut tracker = ReleaseTracker::new().with_timeout_ms(100);
        tracker.press(37, 0);
        tracker.press(37, 90);
        assert!(tracker.expire(180).is_empty());
        assert_eq!(tracker.expire(191).as_slice(), &[37]);
    }

    #[test]
    fn test_real_release_disables_timeout() {
        let mut tracker = ReleaseTracker::new();
        tracker.press(37, 0);
        assert!(tracker.release(37));
        assert!(tracker.release_events_seen());

        tracker.press(39, 0);
        assert!(tracker.expire(10_000).is_empty());
        assert!(tracker.is_held(39));
        assert!(!tracker.release(40));
    }

    #[test]
    fn test_only_expired_codes_released() {
        let mut tracker = ReleaseTracker::new();
        tracker.press(37, 0);
        tracker.press(40, 100);
        assert_eq!(tracker.expire(200).as_slice(), &[37]);
        assert!(tracker.is_held(40));
    }
}
