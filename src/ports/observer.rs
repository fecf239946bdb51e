//! Observer port - abstraction for training observation

use crate::{Result, tictactoe::Outcome};

/// Observer trait for monitoring a training run
///
/// Observers compose: the trainer notifies each registered observer in
/// order, so progress bars, metrics collection, and test probes can coexist
/// without the training loop knowing about any of them.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(episode, outcome)` - after every episode
/// 3. `on_training_end()` - once at the end
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches its terminal state.
    ///
    /// `episode` is 0-based; `outcome` is the final evaluation of the board.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record episode outcomes.
    fn on_episode_end(&mut self, _episode: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to perform cleanup or final reporting.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
