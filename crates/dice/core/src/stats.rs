//! Exact outcome statistics for dice pools.
//!
//! The distribution of a pool's total is built by iterative convolution:
//! start from the uniform distribution over `[1, faces]` and, for every
//! additional die, slide a `faces`-wide window over the running frequencies.
//!
//! Frequencies are exact [`BigUint`] counts out of `faces^count` equally likely
//! outcomes, so 50d6 or 20d100 resolve exactly. The only pools rejected with
//! [`DiceError::DistributionOverflow`] are those whose table would not fit
//! the limits below.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{DiceError, Result};

/// Largest number of distinct totals a distribution may tabulate.
pub const MAX_DISTINCT_TOTALS: u64 = 1 << 18;

/// Upper bound on `count × distinct_totals × frequency_words`.
pub const MAX_CONVOLUTION_WORK: u128 = 1 << 28;

/// Frequency of every achievable total of a dice pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Smallest achievable total; `frequencies[i]` is the count for `min_total + i`.
    min_total: u64,
    frequencies: Vec<BigUint>,
    /// Running sum of `frequencies`, used for rank lookups.
    cumulative: Vec<BigUint>,
    outcomes: BigUint,
}

/// Rejects pools whose table or convolution would be unreasonably large.
fn check_size(count: u32, faces: u32) -> Result<()> {
    let overflow = DiceError::DistributionOverflow { count, faces };
    let distinct_totals = u64::from(count) * u64::from(faces - 1) + 1;
    if distinct_totals > MAX_DISTINCT_TOTALS {
        return Err(overflow);
    }
    if faces == 1 {
        return Ok(());
    }

    let bits_per_die = u32::BITS - (faces - 1).leading_zeros();
    let outcome_bits = u128::from(count) * u128::from(bits_per_die);
    let words = outcome_bits / 64 + 1;
    let work = u128::from(count) * u128::from(distinct_totals) * words;
    if work > MAX_CONVOLUTION_WORK {
        return Err(overflow);
    }
    Ok(())
}

/// `numerator / denominator` as a float, scaled so neither side overflows `f64`.
fn ratio(numerator: &BigUint, denominator: &BigUint) -> f64 {
    let shift = denominator.bits().saturating_sub(64);
    let numerator = (numerator >> shift).to_f64().unwrap_or(0.0);
    let denominator = (denominator >> shift).to_f64().unwrap_or(f64::NAN);
    numerator / denominator
}

impl Distribution {
    /// Computes the distribution of the sum of `count` dice with `faces` sides.
    ///
    /// Callers guarantee `count >= 1` and `faces >= 1`.
    pub fn compute(count: u32, faces: u32) -> Result<Self> {
        check_size(count, faces)?;
        let width = usize::try_from(faces)
            .map_err(|_| DiceError::DistributionOverflow { count, faces })?;

        let frequencies = if faces == 1 {
            vec![BigUint::one()]
        } else {
            let mut frequencies = vec![BigUint::one(); width];
            for _ in 1..count {
                let len = frequencies.len() + width - 1;
                let mut next = Vec::with_capacity(len);
                let mut window = BigUint::zero();
                for slot in 0..len {
                    if let Some(entering) = frequencies.get(slot) {
                        window += entering;
                    }
                    if slot >= width {
                        window -= &frequencies[slot - width];
                    }
                    next.push(window.clone());
                }
                frequencies = next;
            }
            frequencies
        };

        let cumulative: Vec<BigUint> = frequencies
            .iter()
            .scan(BigUint::zero(), |running, freq| {
                *running += freq;
                Some(running.clone())
            })
            .collect();
        let outcomes = cumulative.last().cloned().unwrap_or_else(BigUint::one);

        tracing::debug!(
            count,
            faces,
            distinct_totals = frequencies.len(),
            outcome_bits = outcomes.bits(),
            "computed {}d{} distribution",
            count,
            faces
        );

        Ok(Self {
            min_total: u64::from(count),
            frequencies,
            cumulative,
            outcomes,
        })
    }

    /// Smallest achievable total.
    pub fn min_total(&self) -> u64 {
        self.min_total
    }

    /// Largest achievable total.
    pub fn max_total(&self) -> u64 {
        self.min_total + self.frequencies.len() as u64 - 1
    }

    /// Number of equally likely raw outcomes (`faces^count`).
    pub fn outcomes(&self) -> &BigUint {
        &self.outcomes
    }

    /// Number of distinct achievable totals.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Always false: every pool has at least one achievable total.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Number of raw outcomes summing to `total` (zero if unreachable).
    pub fn frequency(&self, total: u64) -> BigUint {
        total
            .checked_sub(self.min_total)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| self.frequencies.get(offset))
            .cloned()
            .unwrap_or_default()
    }

    /// Probability of rolling exactly `total`.
    pub fn probability(&self, total: u64) -> f64 {
        ratio(&self.frequency(total), &self.outcomes)
    }

    /// Iterates `(total, frequency)` pairs in ascending total order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &BigUint)> + '_ {
        self.frequencies
            .iter()
            .enumerate()
            .map(|(offset, freq)| (self.min_total + offset as u64, freq))
    }

    /// Most frequent total; ties resolve to the smallest total.
    pub fn mode(&self) -> u64 {
        let zero = BigUint::zero();
        let mut best = (self.min_total, &zero);
        for (total, freq) in self.iter() {
            if freq > best.1 {
                best = (total, freq);
            }
        }
        best.0
    }

    /// Total at zero-based `rank` in the sorted multiset of all outcomes.
    pub fn total_at_rank(&self, rank: &BigUint) -> Option<u64> {
        if rank >= &self.outcomes {
            return None;
        }
        let offset = self.cumulative.partition_point(|running| running <= rank);
        Some(self.min_total + offset as u64)
    }

    /// Median of all `faces^count` equally likely totals.
    ///
    /// For an even outcome count this is the mean of the two middle ranks.
    pub fn median(&self) -> f64 {
        let half = &self.outcomes >> 1u32;
        let upper = self.total_at_rank(&half).unwrap_or(self.min_total);
        if (&self.outcomes % 2u32).is_one() {
            return upper as f64;
        }
        let lower = self
            .total_at_rank(&(half - 1u32))
            .unwrap_or(self.min_total);
        (lower + upper) as f64 / 2.0
    }
}

/// Snapshot of every statistic of a die.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSummary {
    /// Dice notation of the die the summary was taken from.
    pub notation: String,
    pub min: u64,
    pub max: u64,
    pub range: u64,
    pub midpoint: u64,
    pub mean: f64,
    pub median: f64,
    pub mode: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_d6_matches_the_textbook_triangle() {
        let dist = Distribution::compute(2, 6).unwrap();
        let freqs: Vec<u32> = dist.iter().map(|(_, f)| f.to_u32().unwrap()).collect();
        assert_eq!(freqs, vec![1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1]);
        assert_eq!(dist.outcomes(), &BigUint::from(36u32));
        assert_eq!(dist.min_total(), 2);
        assert_eq!(dist.max_total(), 12);
        assert_eq!(dist.mode(), 7);
        assert_eq!(dist.median(), 7.0);
    }

    #[test]
    fn three_d6_has_a_two_way_tie_resolved_low() {
        let dist = Distribution::compute(3, 6).unwrap();
        assert_eq!(dist.frequency(10), BigUint::from(27u32));
        assert_eq!(dist.frequency(11), BigUint::from(27u32));
        assert_eq!(dist.mode(), 10);
        assert_eq!(dist.median(), 10.5);
    }

    #[test]
    fn single_die_is_uniform() {
        let dist = Distribution::compute(1, 6).unwrap();
        assert!(dist.iter().all(|(_, f)| f.is_one()));
        assert_eq!(dist.mode(), 1);
        assert_eq!(dist.median(), 3.5);
        assert!((dist.probability(4) - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn odd_outcome_count_picks_the_middle_rank() {
        // 1d3 totals: 1, 2, 3
        let dist = Distribution::compute(1, 3).unwrap();
        assert_eq!(dist.median(), 2.0);
        // 2d3 has 9 outcomes; rank 4 lands on 4
        let dist = Distribution::compute(2, 3).unwrap();
        assert_eq!(dist.median(), 4.0);
    }

    #[test]
    fn one_sided_pools_collapse_to_count() {
        let dist = Distribution::compute(5, 1).unwrap();
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.min_total(), 5);
        assert_eq!(dist.max_total(), 5);
        assert_eq!(dist.mode(), 5);
        assert_eq!(dist.median(), 5.0);
    }

    #[test]
    fn rank_lookup_walks_cumulative_frequencies() {
        let dist = Distribution::compute(2, 6).unwrap();
        let rank = |r: u32| dist.total_at_rank(&BigUint::from(r));
        assert_eq!(rank(0), Some(2));
        assert_eq!(rank(1), Some(3));
        assert_eq!(rank(3), Some(4));
        assert_eq!(rank(35), Some(12));
        assert_eq!(rank(36), None);
        assert!(dist.frequency(1).is_zero());
        assert!(dist.frequency(13).is_zero());
    }

    #[test]
    fn large_pools_stay_exact() {
        let dist = Distribution::compute(50, 6).unwrap();
        assert_eq!(dist.outcomes(), &BigUint::from(6u32).pow(50));
        assert_eq!(dist.median(), 175.0);
        assert_eq!(dist.mode(), 175);
        // Only one way to roll all ones.
        assert!(dist.frequency(50).is_one());
        assert!(dist.probability(175) > 0.0 && dist.probability(175) < 1.0);

        let dist = Distribution::compute(20, 100).unwrap();
        assert_eq!(dist.median(), 1010.0);
        assert_eq!(dist.mode(), 1010);
    }

    #[test]
    fn probabilities_survive_outcomes_beyond_f64() {
        // 6^500 is far past f64::MAX.
        let dist = Distribution::compute(500, 6).unwrap();
        let total: f64 = dist.iter().map(|(t, _)| dist.probability(t)).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(dist.median(), 1750.0);
    }

    #[test]
    fn oversized_tables_are_rejected_before_allocating() {
        let err = Distribution::compute(1, u32::MAX).unwrap_err();
        assert_eq!(
            err,
            DiceError::DistributionOverflow {
                count: 1,
                faces: u32::MAX
            }
        );
        // Few faces, but too many convolution steps over wide frequencies.
        assert!(Distribution::compute(20_000, 2).is_err());
        assert!(Distribution::compute(1 << 30, 1).is_ok());
    }
}
