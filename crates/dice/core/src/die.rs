//! The [`Die`] value type: a pool of identical dice.
//!
//! A `Die` is `count` dice with `faces` sides each. Rolling sums the pool;
//! statistics describe the exact distribution of that sum and are computed
//! once, then cached until `count` or `faces` changes.
//!
//! # Invariants
//!
//! - `count >= 1` and `faces >= 1` at all times
//! - A failed setter leaves the die untouched
//! - A successful setter drops the cached distribution

use std::fmt;
use std::sync::OnceLock;

use crate::error::{DiceError, Result};
use crate::rng::{RollSource, thread_source};
use crate::stats::{Distribution, StatsSummary};

/// `count` identical dice with `faces` sides, rolled and summed together.
///
/// Statistics are exact and deterministic; rolls are not. Comparison and
/// arithmetic operators roll the die on every evaluation (see [`crate::ops`]),
/// so use [`Die::matches`] for structural equality.
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DieRepr", into = "DieRepr")
)]
pub struct Die {
    count: u32,
    faces: u32,
    stats: OnceLock<Result<Distribution>>,
}

impl Die {
    /// Creates a pool of `count` dice with `faces` sides (`2d6` is `Die::new(2, 6)`).
    pub fn new(count: u32, faces: u32) -> Result<Self> {
        Ok(Self {
            count: validate_count(count)?,
            faces: validate_faces(faces)?,
            stats: OnceLock::new(),
        })
    }

    /// Creates a single die with `faces` sides.
    pub fn single(faces: u32) -> Result<Self> {
        Self::new(1, faces)
    }

    /// Number of dice in the pool.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides per die.
    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn set_count(&mut self, count: u32) -> Result<()> {
        self.count = validate_count(count)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_faces(&mut self, faces: u32) -> Result<()> {
        self.faces = validate_faces(faces)?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        if self.stats.take().is_some() {
            tracing::trace!(die = %self, "dropped cached distribution");
        }
    }

    /// Structural equality: same `count` and same `faces`.
    ///
    /// `==` on dice compares two fresh rolls instead.
    pub fn matches(&self, other: &Die) -> bool {
        self.count == other.count && self.faces == other.faces
    }

    // ===== rolling =====

    /// Rolls a single die of the pool.
    pub fn roll_one(&self) -> u32 {
        self.roll_one_with(&mut thread_source())
    }

    /// Rolls a single die of the pool using `source`.
    ///
    /// A one-sided die returns 1 without drawing from `source`.
    pub fn roll_one_with<R: RollSource + ?Sized>(&self, source: &mut R) -> u32 {
        if self.faces == 1 {
            return 1;
        }
        source.roll_die(self.faces)
    }

    /// Lazily rolls every die in the pool, one value per die.
    ///
    /// Each call starts a fresh sequence.
    pub fn roll_iter(&self) -> RollIter<rand::rngs::ThreadRng> {
        RollIter::new(self.count, self.faces, thread_source())
    }

    pub fn roll_iter_with<'a, R: RollSource + ?Sized>(
        &self,
        source: &'a mut R,
    ) -> RollIter<&'a mut R> {
        RollIter::new(self.count, self.faces, source)
    }

    /// Rolls every die in the pool and sums the results.
    pub fn roll_all(&self) -> u64 {
        self.roll_iter().map(u64::from).sum()
    }

    pub fn roll_all_with<R: RollSource + ?Sized>(&self, source: &mut R) -> u64 {
        self.roll_iter_with(source).map(u64::from).sum()
    }

    /// Rolls the die: a single die short-circuits to [`Die::roll_one`],
    /// larger pools are summed by [`Die::roll_all`].
    pub fn roll(&self) -> u64 {
        self.roll_with(&mut thread_source())
    }

    pub fn roll_with<R: RollSource + ?Sized>(&self, source: &mut R) -> u64 {
        let total = if self.count == 1 {
            u64::from(self.roll_one_with(source))
        } else {
            self.roll_all_with(source)
        };
        tracing::trace!(die = %self, total, "rolled");
        total
    }

    // ===== statistics =====

    /// Lowest possible total (every die shows 1).
    pub fn stats_min(&self) -> u64 {
        u64::from(self.count)
    }

    /// Highest possible total (every die shows its top face).
    pub fn stats_max(&self) -> u64 {
        u64::from(self.faces) * u64::from(self.count)
    }

    pub fn stats_range(&self) -> u64 {
        self.stats_max() - self.stats_min()
    }

    /// Midpoint of the achievable totals, rounded down.
    pub fn stats_midpoint(&self) -> u64 {
        (self.stats_min() + self.stats_max()) / 2
    }

    /// Expected total. Exact because the distribution is symmetric.
    pub fn stats_mean(&self) -> f64 {
        (self.stats_min() + self.stats_max()) as f64 / 2.0
    }

    /// Most likely total; ties resolve to the smallest total.
    pub fn stats_mode(&self) -> Result<u64> {
        Ok(self.distribution()?.mode())
    }

    /// Median of all `faces^count` equally likely totals.
    pub fn stats_median(&self) -> Result<f64> {
        Ok(self.distribution()?.median())
    }

    /// Exact distribution of the pool total, computed on first use and cached.
    pub fn distribution(&self) -> Result<&Distribution> {
        self.stats
            .get_or_init(|| Distribution::compute(self.count, self.faces))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Every statistic in one snapshot.
    pub fn stats(&self) -> Result<StatsSummary> {
        let distribution = self.distribution()?;
        Ok(StatsSummary {
            notation: self.to_string(),
            min: self.stats_min(),
            max: self.stats_max(),
            range: self.stats_range(),
            midpoint: self.stats_midpoint(),
            mean: self.stats_mean(),
            median: distribution.median(),
            mode: distribution.mode(),
        })
    }
}

fn validate_count(count: u32) -> Result<u32> {
    if count < 1 {
        return Err(DiceError::InvalidCount(i64::from(count)));
    }
    Ok(count)
}

fn validate_faces(faces: u32) -> Result<u32> {
    if faces < 1 {
        return Err(DiceError::InvalidFaces(i64::from(faces)));
    }
    Ok(faces)
}

impl fmt::Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Die")
            .field("count", &self.count)
            .field("faces", &self.faces)
            .finish()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces)
    }
}

impl IntoIterator for &Die {
    type Item = u32;
    type IntoIter = RollIter<rand::rngs::ThreadRng>;

    fn into_iter(self) -> Self::IntoIter {
        self.roll_iter()
    }
}

/// Lazy sequence of single-die rolls, one per die in a pool.
#[derive(Debug)]
pub struct RollIter<S> {
    faces: u32,
    remaining: u32,
    source: S,
}

impl<S: RollSource> RollIter<S> {
    fn new(count: u32, faces: u32, source: S) -> Self {
        Self {
            faces,
            remaining: count,
            source,
        }
    }
}

impl<S: RollSource> Iterator for RollIter<S> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.faces == 1 {
            return Some(1);
        }
        Some(self.source.roll_die(self.faces))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<S: RollSource> ExactSizeIterator for RollIter<S> {}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DieRepr {
    count: u32,
    faces: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<DieRepr> for Die {
    type Error = DiceError;

    fn try_from(repr: DieRepr) -> Result<Self> {
        Die::new(repr.count, repr.faces)
    }
}

#[cfg(feature = "serde")]
impl From<Die> for DieRepr {
    fn from(die: Die) -> Self {
        Self {
            count: die.count,
            faces: die.faces,
        }
    }
}
