//! Roll an exploding die.

use anyhow::Result;
use clap::Parser;
use console::style;
use dice_core::{Die, utils};

use crate::session::Session;

/// Roll a single die, rolling again on every top face
#[derive(Parser, Debug)]
pub struct Explode {
    /// Single die to explode, e.g. d6
    pub dice: Die,

    /// Maximum number of rolls
    #[arg(long)]
    pub max: Option<usize>,
}

impl Explode {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let Some(rolls) = utils::roll_exploding_list_with(&self.dice, self.max, session.source())?
        else {
            anyhow::bail!("{} never stops exploding; pass --max", self.dice);
        };

        let faces = self.dice.faces();
        let shown: Vec<String> = rolls
            .iter()
            .map(|&roll| {
                if roll == faces {
                    style(roll).green().bold().to_string()
                } else {
                    roll.to_string()
                }
            })
            .collect();
        let total: u64 = rolls.iter().copied().map(u64::from).sum();

        println!(
            "{}: {} = {}",
            style(&self.dice).cyan(),
            shown.join(" + "),
            style(total).bold()
        );
        tracing::debug!("{} exploded {} time(s)", self.dice, rolls.len().saturating_sub(1));
        Ok(())
    }
}
