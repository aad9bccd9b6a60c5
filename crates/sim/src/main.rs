//! Developer tool for reward catalogs.
//!
//! Run with: `cargo run -p reward-sim -- <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Run};

/// Inspect reward catalogs and replay scripted visits
#[derive(Parser)]
#[command(name = "reward-sim")]
#[command(about = "Development tools for rewardable objects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List object templates and preview their rewards
    Inspect(Inspect),

    /// Replay a scenario's scripted visits and print the mutation journal
    Run(Run),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(cmd) => cmd.execute(),
        Command::Run(cmd) => cmd.execute(),
    }
}
