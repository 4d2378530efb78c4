//! Time source abstraction.
//!
//! The game never reads a clock itself; it is handed a delta per update. The
//! host owns a [`FrameTimer`] over some [`Clock`] and turns "now" readings into
//! those deltas. Tests drive a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Turns clock readings into per-frame deltas.
#[derive(Debug, Clone)]
pub struct FrameTimer<C: Clock> {
    clock: C,
    last_ms: u64,
}

impl<C: Clock> FrameTimer<C> {
    pub fn new(clock: C) -> Self {
        let last_ms = clock.now_ms();
        Self { clock, last_ms }
    }

    /// Milliseconds since the previous call (or since construction).
    ///
    /// A clock that goes backwards yields 0.
    pub fn delta_ms(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let delta = now.saturating_sub(self.last_ms);
        self.last_ms = now.max(self.last_ms);
        delta.min(u32::MAX as u64) as u32
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
