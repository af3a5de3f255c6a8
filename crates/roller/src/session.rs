//! Roll session: the configured roll source shared by every command.
use dice_core::{PcgSource, RollSource, seeded_source, thread_source};

use crate::config::{RngKind, RollerConfig};

pub struct Session {
    source: Box<dyn RollSource>,
    pub config: RollerConfig,
}

impl Session {
    pub fn new(config: RollerConfig) -> Self {
        let kind = config.rng_kind();
        let seed = config.seed.unwrap_or_else(rand::random);

        let source: Box<dyn RollSource> = match kind {
            RngKind::Thread => Box::new(thread_source()),
            RngKind::Std => Box::new(seeded_source(seed)),
            RngKind::Pcg => Box::new(PcgSource::new(seed)),
        };

        if kind == RngKind::Thread {
            tracing::debug!("Using thread RNG");
        } else {
            tracing::debug!("Using {} RNG with seed {}", kind, seed);
        }

        Self { source, config }
    }

    pub fn source(&mut self) -> &mut dyn RollSource {
        self.source.as_mut()
    }
}
