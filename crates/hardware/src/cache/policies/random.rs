//! Pseudo-random source for the Random replacement policy.
//!
//! Uses a 64-bit xorshift generator rather than a general-purpose RNG so that a given
//! seed always reproduces the same eviction sequence.

/// Xorshift generator state.
#[derive(Clone, Debug)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// Creates a generator. A zero seed would lock the generator at zero, so it is
    /// replaced by one.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advances the generator and returns the new state.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns an index in `0..len`. `len` must be non-zero.
    pub const fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}
