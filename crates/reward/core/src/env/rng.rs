//! Seeded random stream shared by every randomized decision.
//!
//! # Determinism
//!
//! Given the same seed, an implementation must produce the same sequence.
//! Draws must happen in the same relative order on every replay, so the
//! rules draw exactly once per randomized decision and never speculatively.

/// Shared deterministic random stream.
pub trait RngOracle {
    /// Advances the stream and returns the next value.
    fn next_u32(&mut self) -> u32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with empty range");
        (self.next_u32() as usize) % len.max(1)
    }
}

/// Picks one element of `items` using a single draw. Empty slices draw nothing.
pub fn next_item<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: RngOracle + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// LCG multiplier from the PCG reference implementation.
    const MULTIPLIER: u64 = 6364136223846793005;
    /// LCG increment (stream selector) from the PCG reference implementation.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream positioned at `seed`. The seed is used as the raw
    /// state, so a saved [`state`](Self::state) restores the stream exactly.
    pub const fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current stream position, for checkpointing.
    pub const fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}
