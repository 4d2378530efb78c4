//! Seeded random source for piece selection.
//!
//! Pieces are drawn uniformly from the catalog. The generator is a small LCG so
//! a game is reproducible from its seed alone: same seed, same inputs and same
//! frame deltas give the same board.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as seed 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`. `max` must be non-zero.
    ///
    /// Uses the high 16 bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        let high = self.next_u32() >> 16;
        ((high as u64 * max as u64) >> 16) as u32
    }

    /// Current internal state, usable as a seed to continue the same stream
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
