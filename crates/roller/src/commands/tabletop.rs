//! Advantage, disadvantage and percentile rolls.

use anyhow::Result;
use clap::Parser;
use console::style;
use dice_core::utils;

use crate::session::Session;

/// Roll 2d20 and keep the higher
#[derive(Parser, Debug)]
pub struct Advantage {}

impl Advantage {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let result = utils::roll_advantage_with(session.source());
        println!("advantage: {}", style(result).bold());
        Ok(())
    }
}

/// Roll 2d20 and keep the lower
#[derive(Parser, Debug)]
pub struct Disadvantage {}

impl Disadvantage {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let result = utils::roll_disadvantage_with(session.source());
        println!("disadvantage: {}", style(result).bold());
        Ok(())
    }
}

/// Roll percentile dice (1-100)
#[derive(Parser, Debug)]
pub struct Percentile {}

impl Percentile {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let result = utils::roll_percentile_with(session.source());
        println!("percentile: {}", style(result).bold());
        Ok(())
    }
}
