//! Dice pools with stochastic operators and exact outcome statistics.
//!
//! `dice-core` models a pool of identical dice as a single [`Die`] value.
//! Rolling is random; statistics (min, max, range, midpoint, mean, median,
//! mode) are exact, computed from the full outcome distribution by iterative
//! convolution and cached per die.
//!
//! - [`die`]: the `Die` type, rolling and statistics
//! - [`ops`]: operators that roll on every evaluation
//! - [`stats`]: outcome distributions
//! - [`rng`]: injectable roll sources
//! - [`utils`]: standard dice, advantage, percentile, exploding dice
//! - [`notation`]: `NdF` parsing
//!
//! ```
//! use dice_core::{Die, utils};
//!
//! let two_d6: Die = "2d6".parse()?;
//! assert_eq!(two_d6.stats_median()?, 7.0);
//! assert!((2..=12).contains(&two_d6.roll()));
//!
//! let best = utils::roll_advantage();
//! assert!((1..=20).contains(&best));
//! # Ok::<(), dice_core::DiceError>(())
//! ```
pub mod die;
pub mod error;
pub mod notation;
pub mod ops;
pub mod rng;
pub mod stats;
pub mod utils;

pub use die::{Die, RollIter};
pub use num_bigint::BigUint;
pub use error::{DiceError, DieField, ErrorSeverity, Result};
pub use ops::{Number, Operand};
pub use rng::{PcgSource, RollSource, ScriptedSource, seeded_source, thread_source};
pub use stats::{Distribution, StatsSummary};
pub use utils::{ExplodingRolls, StandardDie};
