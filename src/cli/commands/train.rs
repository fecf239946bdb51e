//! Train command - train an agent and report the learned policy

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::TrainingOpts;
use crate::{
    pipeline::{ProgressObserver, Trainer, TrainingConfig, TrainingResult},
    q_learning::QTable,
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent against a random opponent")]
pub struct TrainArgs {
    #[command(flatten)]
    pub opts: TrainingOpts,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    config: TrainingConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Print the learned Q-values for the nine opening moves, best first
fn display_opening_values(table: &QTable) {
    println!("\n=== Learned Opening Values ===");
    let opening = Board::new();
    let mut values: Vec<(usize, f64)> = (0..9).map(|a| (a, table.get(&opening, a))).collect();
    values.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (action, q) in values {
        println!("  cell {action}: {q:+.4}");
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.opts.to_config();

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let mut trainer = Trainer::new(config.clone())?;
    if args.opts.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = trainer.run()?;

    println!("\n=== Training Complete ===");
    println!("Total episodes: {}", result.total_episodes);
    println!("Wins: {} ({:.1}%)", result.wins, result.win_rate * 100.0);
    println!("Draws: {} ({:.1}%)", result.draws, result.draw_rate * 100.0);
    println!(
        "Losses: {} ({:.1}%)",
        result.losses,
        result.loss_rate * 100.0
    );
    println!("Stored Q-values: {}", trainer.table().len());

    display_opening_values(trainer.table());

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!(
                "\nNormalizing summary path to {}",
                summary_path.display()
            );
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: result,
            config,
        };

        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
