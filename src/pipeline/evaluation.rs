//! Evaluation games for a trained agent against a random opponent

use rand::{rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::training::TrainingResult;
use crate::{
    Result,
    q_learning::{TrainedAgent, agent::build_rng},
    tictactoe::{Board, Outcome, Player},
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub games: usize,

    /// Seed for the opponent's move sampling
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
        }
    }
}

/// Plays fresh games with the frozen greedy policy and tallies outcomes
///
/// The agent plays X and opens, as during training; the opponent plays O
/// with uniformly random legal moves. No Q-value changes during evaluation,
/// so the result measures exactly the policy that training produced.
pub struct Evaluation {
    config: EvaluationConfig,
    rng: StdRng,
}

impl Evaluation {
    /// Create an evaluation run
    pub fn new(config: EvaluationConfig) -> Self {
        let rng = build_rng(config.seed);
        Self { config, rng }
    }

    /// Run the configured number of games
    pub fn run(&mut self, agent: &mut TrainedAgent) -> Result<TrainingResult> {
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for _ in 0..self.config.games {
            match self.play_game(agent)? {
                Outcome::Win(Player::X) => wins += 1,
                Outcome::Win(Player::O) => losses += 1,
                Outcome::Draw => draws += 1,
                Outcome::InProgress => {}
            }
        }

        Ok(TrainingResult::new(self.config.games, wins, draws, losses))
    }

    fn play_game(&mut self, agent: &mut TrainedAgent) -> Result<Outcome> {
        let mut state = Board::new();
        let mut to_move = Player::X;

        while !state.evaluate().is_terminal() {
            let action = match to_move {
                Player::X => agent.best_move(&state),
                Player::O => state.legal_moves().choose(&mut self.rng).copied(),
            };
            let Some(action) = action else { break };

            state = state.apply(action, to_move)?;
            to_move = to_move.opponent();
        }

        Ok(state.evaluate())
    }
}
