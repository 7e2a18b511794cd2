//! smartcab CLI - drive Q-learning runs in the synthetic grid world

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smartcab")]
#[command(version, about = "Tabular Q-learning driving agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a learning agent through a simulation
    Train(smartcab::cli::commands::train::TrainArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => smartcab::cli::commands::train::execute(args),
    }
}
