//! Play command - train an agent, then play against it on the terminal

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;

use super::TrainingOpts;
use crate::{
    pipeline::{ProgressObserver, Trainer},
    tictactoe::{Board, Outcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent, then play against it")]
pub struct PlayArgs {
    #[command(flatten)]
    pub opts: TrainingOpts,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut trainer = Trainer::new(args.opts.to_config())?;
    if args.opts.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    println!(
        "Training the agent for {} episodes... this only takes a moment.",
        args.opts.episodes
    );
    trainer.run()?;
    println!("Training complete!\n");

    let mut agent = trainer.into_agent();

    println!("The agent plays X and moves first; you play O.");
    println!("Cells are numbered:");
    println!("  0 1 2");
    println!("  3 4 5");
    println!("  6 7 8\n");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut board = Board::new();
    let mut to_move = Player::X;

    loop {
        match board.evaluate() {
            Outcome::Win(Player::X) => {
                println!("The agent wins!");
                break;
            }
            Outcome::Win(Player::O) => {
                println!("You win! Congratulations!");
                break;
            }
            Outcome::Draw => {
                println!("It's a draw!");
                break;
            }
            Outcome::InProgress => {}
        }

        if to_move == Player::X {
            let Some(action) = agent.best_move(&board) else {
                println!("No moves left. It's a draw!");
                break;
            };
            board = board.apply(action, Player::X)?;
            println!("Agent plays cell {action}:");
            println!("{board}\n");
            to_move = Player::O;
        } else {
            let legal = board.legal_moves();
            println!("Your turn. Open cells: {legal:?}");
            print!("Enter a position (0-8): ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!("\nInput closed; quitting.");
                break;
            };
            let line = line?;

            let Ok(position) = line.trim().parse::<usize>() else {
                println!("Invalid input. Try again.\n");
                continue;
            };
            if !legal.contains(&position) {
                println!("Cell {position} is not open. Try again.\n");
                continue;
            }

            board = board.apply(position, Player::O)?;
            println!("{board}\n");
            to_move = Player::X;
        }
    }

    Ok(())
}
