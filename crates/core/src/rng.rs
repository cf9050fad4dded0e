//! RNG module - seedable shuffling for board generation
//!
//! Boards are dealt with a Fisher-Yates shuffle driven by a small LCG.
//! Bounded draws use rejection sampling so every permutation is equally
//! likely regardless of the range size.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG have short periods; fold the high half in.
        self.state ^ (self.state >> 16)
    }

    /// Generate a uniformly distributed value in `[0, max)`.
    ///
    /// `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        // Largest multiple of `max` that fits in u32; values at or above it are redrawn.
        let zone = u32::MAX - (u32::MAX % max);
        loop {
            let v = self.next_u32();
            if v < zone {
                return v % max;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current RNG state (re-seeding with it continues the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
