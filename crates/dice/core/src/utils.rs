//! Conventional dice and tabletop rolling helpers.
//!
//! Stateless helpers built on [`Die`]:
//!
//! - factories for the standard polyhedral set ([`d4`] … [`d100`], [`StandardDie`])
//! - advantage / disadvantage (best or worst of two d20)
//! - percentile rolls from a tens and a units draw
//! - exploding dice, as a lazy iterator or a collected list
//!
//! Each rolling helper has a `*_with` variant that takes a [`RollSource`].

use std::iter::FusedIterator;

use crate::die::Die;
use crate::error::{DiceError, Result};
use crate::rng::{RollSource, thread_source};

/// The standard polyhedral dice.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StandardDie {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl StandardDie {
    /// Number of faces on this die.
    pub const fn faces(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// A pool of `count` dice of this kind.
    pub fn pool(self, count: u32) -> Result<Die> {
        Die::new(count, self.faces())
    }
}

pub fn d4(count: u32) -> Result<Die> {
    StandardDie::D4.pool(count)
}

pub fn d6(count: u32) -> Result<Die> {
    StandardDie::D6.pool(count)
}

pub fn d8(count: u32) -> Result<Die> {
    StandardDie::D8.pool(count)
}

pub fn d10(count: u32) -> Result<Die> {
    StandardDie::D10.pool(count)
}

pub fn d12(count: u32) -> Result<Die> {
    StandardDie::D12.pool(count)
}

pub fn d20(count: u32) -> Result<Die> {
    StandardDie::D20.pool(count)
}

pub fn d100(count: u32) -> Result<Die> {
    StandardDie::D100.pool(count)
}

// ===== advantage / disadvantage =====

/// Rolls two d20 and keeps the higher.
pub fn roll_advantage() -> u32 {
    roll_advantage_with(&mut thread_source())
}

pub fn roll_advantage_with<R: RollSource + ?Sized>(source: &mut R) -> u32 {
    let (first, second) = two_d20(source);
    first.max(second)
}

/// Rolls two d20 and keeps the lower.
pub fn roll_disadvantage() -> u32 {
    roll_disadvantage_with(&mut thread_source())
}

pub fn roll_disadvantage_with<R: RollSource + ?Sized>(source: &mut R) -> u32 {
    let (first, second) = two_d20(source);
    first.min(second)
}

fn two_d20<R: RollSource + ?Sized>(source: &mut R) -> (u32, u32) {
    let faces = StandardDie::D20.faces();
    let first = source.roll_die(faces);
    let second = source.roll_die(faces);
    (first, second)
}

// ===== percentile =====

/// Rolls percentile dice (1-100).
///
/// The tens die (00-90) is drawn first, then the units die (0-9). A double
/// zero reads as 100, not 0. Distinct from a d100 only in how it is drawn.
pub fn roll_percentile() -> u32 {
    roll_percentile_with(&mut thread_source())
}

pub fn roll_percentile_with<R: RollSource + ?Sized>(source: &mut R) -> u32 {
    let tens = source.draw(0, 9) * 10;
    let units = source.draw(0, 9);
    match tens + units {
        0 => 100,
        result => result,
    }
}

// ===== exploding dice =====

/// Rolls of an exploding die.
///
/// The die is rolled again every time it shows its top face. The sequence
/// ends with the first roll below the top face (that roll is included), or
/// once `limit` rolls have been produced.
///
/// A one-sided die always shows its top face, so without a limit the sequence
/// is infinite. That case is only produced lazily and [`is_unbounded`]
/// reports it; [`collect_bounded`] refuses to collect it.
///
/// [`is_unbounded`]: ExplodingRolls::is_unbounded
/// [`collect_bounded`]: ExplodingRolls::collect_bounded
#[derive(Debug)]
pub struct ExplodingRolls<'d, S> {
    die: &'d Die,
    source: S,
    limit: Option<usize>,
    produced: usize,
    finished: bool,
}

impl<'d, S: RollSource> ExplodingRolls<'d, S> {
    fn new(die: &'d Die, limit: Option<usize>, source: S) -> Result<Self> {
        if die.count() != 1 {
            return Err(DiceError::PoolSize { count: die.count() });
        }
        Ok(Self {
            die,
            source,
            limit,
            produced: 0,
            finished: false,
        })
    }

    /// True when the sequence can never end on its own.
    pub fn is_unbounded(&self) -> bool {
        self.limit.is_none() && self.die.faces() == 1
    }

    /// Number of rolls produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Collects the remaining rolls, refusing an unbounded sequence.
    pub fn collect_bounded(self) -> Result<Vec<u32>> {
        if self.is_unbounded() {
            return Err(DiceError::UnboundedExplosion {
                faces: self.die.faces(),
            });
        }
        Ok(self.collect())
    }

    fn at_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.produced >= limit)
    }
}

impl<S: RollSource> Iterator for ExplodingRolls<'_, S> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.finished || self.at_limit() {
            return None;
        }
        let roll = self.die.roll_one_with(&mut self.source);
        self.produced += 1;
        if roll < self.die.faces() {
            self.finished = true;
        } else {
            tracing::trace!(die = %self.die, roll, produced = self.produced, "exploded");
        }
        Some(roll)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished || self.at_limit() {
            return (0, Some(0));
        }
        if self.is_unbounded() {
            return (usize::MAX, None);
        }
        (1, self.limit.map(|limit| limit - self.produced))
    }
}

impl<S: RollSource> FusedIterator for ExplodingRolls<'_, S> {}

/// Lazily rolls an exploding single die.
///
/// `max_explosions` caps the number of rolls; `None` means no cap. Pools
/// (`count != 1`) are rejected with [`DiceError::PoolSize`].
pub fn roll_exploding_iter(
    die: &Die,
    max_explosions: Option<usize>,
) -> Result<ExplodingRolls<'_, rand::rngs::ThreadRng>> {
    ExplodingRolls::new(die, max_explosions, thread_source())
}

pub fn roll_exploding_iter_with<'d, 'r, R: RollSource + ?Sized>(
    die: &'d Die,
    max_explosions: Option<usize>,
    source: &'r mut R,
) -> Result<ExplodingRolls<'d, &'r mut R>> {
    ExplodingRolls::new(die, max_explosions, source)
}

/// Rolls an exploding single die and collects the rolls.
///
/// Returns `Ok(None)` for a one-sided die without a cap, whose explosion
/// would never end.
pub fn roll_exploding_list(die: &Die, max_explosions: Option<usize>) -> Result<Option<Vec<u32>>> {
    roll_exploding_list_with(die, max_explosions, &mut thread_source())
}

pub fn roll_exploding_list_with<R: RollSource + ?Sized>(
    die: &Die,
    max_explosions: Option<usize>,
    source: &mut R,
) -> Result<Option<Vec<u32>>> {
    let rolls = roll_exploding_iter_with(die, max_explosions, source)?;
    if rolls.is_unbounded() {
        tracing::debug!(die = %die, "refusing unbounded explosion");
        return Ok(None);
    }
    Ok(Some(rolls.collect()))
}

/// Sum of an exploding roll, or `Ok(None)` when the explosion is unbounded.
pub fn roll_exploding_total(die: &Die, max_explosions: Option<usize>) -> Result<Option<u64>> {
    roll_exploding_total_with(die, max_explosions, &mut thread_source())
}

pub fn roll_exploding_total_with<R: RollSource + ?Sized>(
    die: &Die,
    max_explosions: Option<usize>,
    source: &mut R,
) -> Result<Option<u64>> {
    let rolls = roll_exploding_list_with(die, max_explosions, source)?;
    Ok(rolls.map(|rolls| rolls.into_iter().map(u64::from).sum()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use strum::IntoEnumIterator;

    #[test]
    fn factories_use_conventional_faces() {
        let faces: Vec<u32> = StandardDie::iter().map(StandardDie::faces).collect();
        assert_eq!(faces, vec![4, 6, 8, 10, 12, 20, 100]);
        assert_eq!(d6(3).unwrap().to_string(), "3d6");
        assert_eq!(d100(1).unwrap().faces(), 100);
        assert!(d20(0).is_err());
    }

    #[test]
    fn standard_die_names_parse() {
        assert_eq!("D20".parse::<StandardDie>().unwrap(), StandardDie::D20);
        assert_eq!(StandardDie::D12.to_string(), "d12");
        assert!("d7".parse::<StandardDie>().is_err());
    }

    #[test]
    fn advantage_keeps_the_best_of_two() {
        let mut script = ScriptedSource::new([5, 15]);
        assert_eq!(roll_advantage_with(&mut script), 15);
        assert_eq!(roll_disadvantage_with(&mut script), 5);
    }

    #[test]
    fn percentile_double_zero_is_one_hundred() {
        let mut script = ScriptedSource::new([0, 0]);
        assert_eq!(roll_percentile_with(&mut script), 100);
        let mut script = ScriptedSource::new([4, 2]);
        assert_eq!(roll_percentile_with(&mut script), 42);
        let mut script = ScriptedSource::new([0, 7]);
        assert_eq!(roll_percentile_with(&mut script), 7);
    }

    #[test]
    fn explosion_stops_on_first_low_roll() {
        let d6 = d6(1).unwrap();
        let mut script = ScriptedSource::new([6, 6, 3, 6]);
        let rolls = roll_exploding_list_with(&d6, None, &mut script).unwrap();
        assert_eq!(rolls, Some(vec![6, 6, 3]));
    }

    #[test]
    fn explosion_respects_the_cap() {
        let d6 = d6(1).unwrap();
        let mut script = ScriptedSource::new([6]);
        let rolls = roll_exploding_list_with(&d6, Some(3), &mut script).unwrap();
        assert_eq!(rolls, Some(vec![6, 6, 6]));
        let none = roll_exploding_list_with(&d6, Some(0), &mut script).unwrap();
        assert_eq!(none, Some(vec![]));
    }

    #[test]
    fn exploding_pools_are_rejected() {
        let pool = d6(2).unwrap();
        assert_eq!(
            roll_exploding_list(&pool, Some(3)).unwrap_err(),
            DiceError::PoolSize { count: 2 }
        );
        assert!(roll_exploding_iter(&pool, None).is_err());
    }

    #[test]
    fn one_sided_die_without_cap_is_unbounded() {
        let d1 = Die::single(1).unwrap();
        assert_eq!(roll_exploding_list(&d1, None).unwrap(), None);
        assert_eq!(roll_exploding_total(&d1, None).unwrap(), None);

        let rolls = roll_exploding_iter(&d1, None).unwrap();
        assert!(rolls.is_unbounded());
        assert_eq!(rolls.size_hint(), (usize::MAX, None));
        let first: Vec<u32> = rolls.take(5).collect();
        assert_eq!(first, vec![1; 5]);

        let err = roll_exploding_iter(&d1, None)
            .unwrap()
            .collect_bounded()
            .unwrap_err();
        assert_eq!(err, DiceError::UnboundedExplosion { faces: 1 });
    }

    #[test]
    fn one_sided_die_with_cap_fills_the_cap() {
        let d1 = Die::single(1).unwrap();
        assert_eq!(roll_exploding_list(&d1, Some(4)).unwrap(), Some(vec![1; 4]));
        assert_eq!(roll_exploding_total(&d1, Some(4)).unwrap(), Some(4));
    }

    #[test]
    fn exploding_iterator_is_fused() {
        let d4 = d4(1).unwrap();
        let mut script = ScriptedSource::new([2]);
        let mut rolls = roll_exploding_iter_with(&d4, None, &mut script).unwrap();
        assert_eq!(rolls.next(), Some(2));
        assert_eq!(rolls.next(), None);
        assert_eq!(rolls.next(), None);
        assert_eq!(rolls.produced(), 1);
    }
}
