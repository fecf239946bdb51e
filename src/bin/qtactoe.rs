//! qtactoe CLI - tabular Q-learning for tic-tac-toe
//!
//! Subcommands:
//! - Train an agent against a random opponent and inspect what it learned
//! - Evaluate the trained greedy policy over fresh games
//! - Play against the trained agent interactively

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qtactoe")]
#[command(version, about = "Tabular Q-learning for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and report the learned policy
    Train(qtactoe::cli::commands::train::TrainArgs),

    /// Train, then evaluate the greedy policy against random play
    Evaluate(qtactoe::cli::commands::evaluate::EvaluateArgs),

    /// Train, then play against the agent
    Play(qtactoe::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qtactoe::cli::commands::train::execute(args),
        Commands::Evaluate(args) => qtactoe::cli::commands::evaluate::execute(args),
        Commands::Play(args) => qtactoe::cli::commands::play::execute(args),
    }
}
