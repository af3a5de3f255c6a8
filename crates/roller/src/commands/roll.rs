//! Roll a dice pool one or more times.

use anyhow::Result;
use clap::Parser;
use console::style;
use dice_core::Die;

use crate::session::Session;

/// Roll dice written in NdF notation
#[derive(Parser, Debug)]
pub struct Roll {
    /// Dice to roll, e.g. 2d6, d20, d%
    pub dice: Die,

    /// Number of times to roll
    #[arg(short = 'n', long, default_value_t = 1)]
    pub times: u32,

    /// Show each die next to the total
    #[arg(short, long)]
    pub each: bool,
}

impl Roll {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let max_times = session.config.max_times;
        if self.times > max_times {
            anyhow::bail!(
                "--times {} exceeds the configured limit of {} (DICE_MAX_TIMES)",
                self.times,
                max_times
            );
        }

        for _ in 0..self.times {
            if self.each {
                let rolls: Vec<u32> = self.dice.roll_iter_with(session.source()).collect();
                let total: u64 = rolls.iter().copied().map(u64::from).sum();
                println!(
                    "{}: {} {}",
                    style(&self.dice).cyan(),
                    style(total).bold(),
                    style(format!("{rolls:?}")).dim()
                );
            } else {
                let total = self.dice.roll_with(session.source());
                println!("{}: {}", style(&self.dice).cyan(), style(total).bold());
            }
        }

        tracing::debug!("Rolled {} {} time(s)", self.dice, self.times);
        Ok(())
    }
}
