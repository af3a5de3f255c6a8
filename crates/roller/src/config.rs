//! Roller configuration from environment variables.
use std::env;

/// Which roll source backs a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RngKind {
    /// Thread-local RNG, never reproducible.
    Thread,
    /// Seedable standard RNG.
    Std,
    /// Fixed-algorithm PCG, reproducible across versions.
    Pcg,
}

/// Roller configuration.
///
/// Command-line flags take precedence over these values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollerConfig {
    /// Seed for reproducible rolls.
    pub seed: Option<u64>,
    /// Explicitly requested roll source, if any.
    pub rng: Option<RngKind>,
    /// Upper bound for `roll --times`.
    pub max_times: u32,
}

impl RollerConfig {
    pub const DEFAULT_MAX_TIMES: u32 = 1000;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DICE_SEED` - Seed for reproducible rolls (default: none)
    /// - `DICE_RNG` - Roll source: `thread`, `std` or `pcg`
    ///   (default: `std` when seeded, otherwise `thread`)
    /// - `DICE_MAX_TIMES` - Cap for `roll --times` (default: 1000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("DICE_SEED");
        config.rng = read_env::<RngKind>("DICE_RNG");
        if let Some(max_times) = read_env::<u32>("DICE_MAX_TIMES") {
            config.max_times = max_times.max(1);
        }

        config
    }

    /// Applies a seed given on the command line.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Roll source to use once seed and explicit choice are combined.
    pub fn rng_kind(&self) -> RngKind {
        match (self.rng, self.seed) {
            (Some(kind), _) => kind,
            (None, Some(_)) => RngKind::Std,
            (None, None) => RngKind::Thread,
        }
    }
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rng: None,
            max_times: Self::DEFAULT_MAX_TIMES,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_selects_std_unless_overridden() {
        let config = RollerConfig::default();
        assert_eq!(config.rng_kind(), RngKind::Thread);

        let seeded = config.clone().with_seed(Some(3));
        assert_eq!(seeded.rng_kind(), RngKind::Std);

        let pcg = RollerConfig {
            rng: Some(RngKind::Pcg),
            ..seeded
        };
        assert_eq!(pcg.rng_kind(), RngKind::Pcg);
    }

    #[test]
    fn cli_seed_overrides_environment_seed() {
        let config = RollerConfig {
            seed: Some(1),
            ..RollerConfig::default()
        };
        assert_eq!(config.clone().with_seed(None).seed, Some(1));
        assert_eq!(config.with_seed(Some(9)).seed, Some(9));
    }

    #[test]
    fn rng_kind_parses_case_insensitively() {
        assert_eq!("PCG".parse::<RngKind>().unwrap(), RngKind::Pcg);
        assert!("mersenne".parse::<RngKind>().is_err());
    }
}
