//! Roll sources for dice randomness.
//!
//! Every rolling operation in this crate has a variant that takes a
//! [`RollSource`], so callers decide where randomness comes from:
//!
//! - [`rand::rngs::ThreadRng`]: the process-wide default used by the plain
//!   `roll*` methods
//! - [`rand::rngs::StdRng`]: seedable, for reproducible sessions
//! - [`PcgSource`]: small deterministic generator with a stable algorithm
//! - [`ScriptedSource`]: replays fixed values, for tests and replays
//!
//! # Determinism
//!
//! Seeded sources must produce the same sequence of draws given the same seed.
//! No determinism is promised for the thread RNG.

use std::collections::VecDeque;

use rand::Rng;

/// Source of uniformly distributed integers for dice rolls.
pub trait RollSource {
    /// Draw a uniform integer in `[low, high]` inclusive.
    ///
    /// Returns `low` when `low >= high`.
    fn draw(&mut self, low: u32, high: u32) -> u32;

    /// Roll a die with N faces (1-N inclusive).
    fn roll_die(&mut self, faces: u32) -> u32 {
        self.draw(1, faces)
    }
}

impl<S: RollSource + ?Sized> RollSource for &mut S {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        (**self).draw(low, high)
    }
}

impl RollSource for rand::rngs::ThreadRng {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }
}

impl RollSource for rand::rngs::StdRng {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.gen_range(low..=high)
    }
}

/// Returns the process-wide default roll source.
pub fn thread_source() -> rand::rngs::ThreadRng {
    rand::thread_rng()
}

/// Returns a [`rand::rngs::StdRng`] seeded from `seed`.
pub fn seeded_source(seed: u64) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(seed)
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. The algorithm is fixed, so a
/// seed replays the same rolls across platforms and crate versions, which
/// [`rand::rngs::StdRng`] does not promise.
///
/// Range reduction is a plain modulo, so very large face counts carry a small
/// bias toward low faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgSource {
    state: u64,
}

impl PcgSource {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose first output depends only on `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        Self::output(self.state)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RollSource for PcgSource {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        let span = u64::from(high - low) + 1;
        low + (u64::from(self.next_u32()) % span) as u32
    }
}

/// Replays a fixed script of draws.
///
/// Each draw returns the next scripted value clamped into the requested range.
/// The script repeats once exhausted; an empty script always yields `low`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedSource {
    script: VecDeque<u32>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    /// Number of values in one pass of the script.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl RollSource for ScriptedSource {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        let Some(value) = self.script.pop_front() else {
            return low;
        };
        self.script.push_back(value);
        value.clamp(low, high.max(low))
    }
}
