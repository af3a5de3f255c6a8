//! Command-line dice roller.
//!
//! Thin shell over `dice-core`: parses NdF notation, rolls with the configured
//! roll source and prints results to stdout. Logs go to stderr and are
//! filtered with `RUST_LOG`.
//!
//! # Examples
//!
//! ```bash
//! roll roll 2d6 --times 3
//! roll stats 3d6 --distribution
//! roll --seed 42 explode d6 --max 5
//! ```

mod commands;
mod config;
mod session;

use anyhow::Result;
use clap::Parser;
use commands::{Advantage, Disadvantage, Explode, Percentile, Roll, Stats};
use config::RollerConfig;
use dice_core::DiceError;
use session::Session;

/// Roll dice and inspect their exact statistics
#[derive(Parser)]
#[command(name = "roll")]
#[command(about = "Roll dice and inspect their exact statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for reproducible rolls (overrides DICE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Roll dice written in NdF notation
    Roll(Roll),

    /// Show exact statistics for a dice pool
    Stats(Stats),

    /// Roll 2d20 and keep the higher
    Advantage(Advantage),

    /// Roll 2d20 and keep the lower
    Disadvantage(Disadvantage),

    /// Roll percentile dice (1-100)
    Percentile(Percentile),

    /// Roll a single die, rolling again on every top face
    Explode(Explode),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for DICE_SEED and other env vars)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RollerConfig::from_env().with_seed(cli.seed);
    let mut session = Session::new(config);

    let outcome = match cli.command {
        Command::Roll(cmd) => cmd.execute(&mut session),
        Command::Stats(cmd) => cmd.execute(),
        Command::Advantage(cmd) => cmd.execute(&mut session),
        Command::Disadvantage(cmd) => cmd.execute(&mut session),
        Command::Percentile(cmd) => cmd.execute(&mut session),
        Command::Explode(cmd) => cmd.execute(&mut session),
    };

    if let Err(err) = &outcome {
        log_failure(err);
    }
    outcome
}

/// Logs library failures with their stable code and severity.
fn log_failure(err: &anyhow::Error) {
    match error_fields(err) {
        Some((code, severity)) => tracing::error!(code, severity, "{err:#}"),
        None => tracing::error!("{err:#}"),
    }
}

/// Error code and severity of the `DiceError` behind `err`, if any.
fn error_fields(err: &anyhow::Error) -> Option<(&'static str, &'static str)> {
    err.downcast_ref::<DiceError>()
        .map(|dice_err| (dice_err.error_code(), dice_err.severity().as_str()))
}
