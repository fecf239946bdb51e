//! Evaluate command - measure the greedy policy over fresh games

use anyhow::Result;
use clap::Parser;

use super::TrainingOpts;
use crate::pipeline::{Evaluation, EvaluationConfig, ProgressObserver, Trainer};

#[derive(Parser, Debug)]
#[command(about = "Train an agent, then evaluate its greedy policy vs random play")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub opts: TrainingOpts,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Seed for the evaluation opponent (defaults to seed+1)
    #[arg(long)]
    pub eval_seed: Option<u64>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = args.opts.to_config();

    let mut trainer = Trainer::new(config)?;
    if args.opts.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    println!("Training for {} episodes...", args.opts.episodes);
    let training_result = trainer.run()?;
    println!(
        "Training done: {} W / {} D / {} L",
        training_result.wins, training_result.draws, training_result.losses
    );

    let eval_seed = args
        .eval_seed
        .or_else(|| args.opts.seed.map(|s| s.wrapping_add(1)));
    let eval_config = EvaluationConfig {
        games: args.games,
        seed: eval_seed,
    };

    let mut agent = trainer.into_agent();
    let result = Evaluation::new(eval_config).run(&mut agent)?;

    println!("\n=== Evaluation Results ===");
    println!("Total games: {}", result.total_episodes);
    println!("Wins: {} ({:.1}%)", result.wins, result.win_rate * 100.0);
    println!("Draws: {} ({:.1}%)", result.draws, result.draw_rate * 100.0);
    println!(
        "Losses: {} ({:.1}%)",
        result.losses,
        result.loss_rate * 100.0
    );

    Ok(())
}
