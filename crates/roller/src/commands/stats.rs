//! Print exact statistics for a dice pool.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use dice_core::Die;

/// Show exact statistics for dice written in NdF notation
#[derive(Parser, Debug)]
pub struct Stats {
    /// Dice to describe, e.g. 3d6
    pub dice: Die,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the frequency of every total
    #[arg(short, long)]
    pub distribution: bool,
}

impl Stats {
    pub fn execute(self) -> Result<()> {
        let summary = self
            .dice
            .stats()
            .with_context(|| format!("Failed to compute statistics for {}", self.dice))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!("{}", style(&summary.notation).cyan().bold());
        println!("  min       {}", summary.min);
        println!("  max       {}", summary.max);
        println!("  range     {}", summary.range);
        println!("  midpoint  {}", summary.midpoint);
        println!("  mean      {}", summary.mean);
        println!("  median    {}", summary.median);
        println!("  mode      {}", summary.mode);

        if self.distribution {
            let distribution = self.dice.distribution()?;
            println!();
            println!("{}", style("  total  frequency  probability").dim());
            for (total, frequency) in distribution.iter() {
                println!(
                    "  {:>5}  {:>9}  {:>10.4}%",
                    total,
                    frequency,
                    distribution.probability(total) * 100.0
                );
            }
        }

        Ok(())
    }
}
