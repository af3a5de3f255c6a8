//! Command implementations for the roller.
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod explode;
mod roll;
mod stats;
mod tabletop;

pub use explode::Explode;
pub use roll::Roll;
pub use stats::Stats;
pub use tabletop::{Advantage, Disadvantage, Percentile};
