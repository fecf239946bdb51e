//! CLI subcommands

pub mod evaluate;
pub mod play;
pub mod train;

use clap::Args;

use crate::pipeline::TrainingConfig;

/// Hyperparameter options shared by every subcommand that trains an agent
#[derive(Args, Debug, Clone)]
pub struct TrainingOpts {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 5000)]
    pub episodes: usize,

    /// Learning rate alpha, in (0, 1]
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor gamma, in [0, 1]
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration probability epsilon, in [0, 1]
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a progress bar while training
    #[arg(long)]
    pub progress: bool,
}

impl TrainingOpts {
    /// Build a training configuration from the parsed flags
    pub fn to_config(&self) -> TrainingConfig {
        let mut config = TrainingConfig::default()
            .with_episodes(self.episodes)
            .with_alpha(self.alpha)
            .with_gamma(self.gamma)
            .with_epsilon(self.epsilon);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}
