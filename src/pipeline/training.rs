//! Training pipeline: episode state machine and run bookkeeping

use rand::{rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    q_learning::{Policy, QTable, TrainedAgent, agent::build_rng},
    tictactoe::{Board, Outcome, Player},
};

/// Turn states of a training episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Agent,
    Opponent,
    Done,
}

/// Training configuration
///
/// Hyperparameters are validated once, when the [`Trainer`] is built, so the
/// episode loop never re-checks them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Learning rate α, in (0, 1]
    pub alpha: f64,

    /// Discount factor γ, in [0, 1]
    pub gamma: f64,

    /// Exploration probability ε, in [0, 1]
    pub epsilon: f64,

    /// Random seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 5000,
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Set the episode count.
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every hyperparameter range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| {
            Err(crate::Error::InvalidConfiguration { message })
        };

        if self.episodes == 0 {
            return fail("episodes must be a positive integer".to_string());
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return fail(format!("alpha {} must be in (0, 1]", self.alpha));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return fail(format!("gamma {} must be in [0, 1]", self.gamma));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return fail(format!("epsilon {} must be in [0, 1]", self.epsilon));
        }
        Ok(())
    }
}

/// Result of a training run, counted from the agent's (X) perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(total_episodes: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives repeated Q-learning episodes against a uniformly random opponent
///
/// The trainer owns the value table for the lifetime of the run: one writer,
/// strictly sequential episodes, no shared state. The agent plays X and
/// opens every episode; the opponent plays O and samples uniformly from the
/// legal moves.
pub struct Trainer {
    config: TrainingConfig,
    table: QTable,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
}

impl Trainer {
    /// Create a trainer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if any hyperparameter is out of range.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let rng = build_rng(config.seed);
        Ok(Self {
            config,
            table: QTable::new(),
            rng,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the run
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The configuration this trainer runs with
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The value table accumulated so far
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Consume the trainer and wrap its table in a greedy deployment agent
    ///
    /// The agent's tie-break generator is derived from the training seed so
    /// a fully seeded train-then-play sequence stays reproducible.
    pub fn into_agent(self) -> TrainedAgent {
        let seed = self.config.seed.map(|s| s.wrapping_add(1));
        TrainedAgent::new(self.table, seed)
    }

    /// Run the configured number of episodes
    ///
    /// All learning accumulates in the single shared table across episodes.
    pub fn run(&mut self) -> Result<TrainingResult> {
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let outcome = self.run_episode()?;

            match outcome {
                Outcome::Win(Player::X) => wins += 1,
                Outcome::Win(Player::O) => losses += 1,
                Outcome::Draw => draws += 1,
                Outcome::InProgress => {}
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(self.config.episodes, wins, draws, losses))
    }

    /// Play one full episode, updating the table after every agent move
    ///
    /// The episode is a three-state machine. Each iteration re-evaluates the
    /// board first, so a terminal position is never played on:
    ///
    /// - `Agent`: epsilon-greedy move, reward from the resulting position
    ///   (+1.0 win, -1.0 loss, 0.0 otherwise), then the TD update.
    /// - `Opponent`: uniformly random move. When that move ends the game,
    ///   the episode stops without a further update: the agent's preceding
    ///   move keeps its value until later episodes revisit the state. Losses
    ///   inflicted here therefore reach the table only indirectly.
    /// - `Done`: terminal.
    fn run_episode(&mut self) -> Result<Outcome> {
        let policy = Policy::epsilon_greedy(self.config.epsilon);
        let mut state = Board::new();
        let mut turn = Turn::Agent;

        while turn != Turn::Done {
            if state.evaluate().is_terminal() {
                turn = Turn::Done;
                continue;
            }

            match turn {
                Turn::Agent => {
                    let Some(action) = policy.select(&self.table, &state, &mut self.rng) else {
                        turn = Turn::Done;
                        continue;
                    };

                    let next = state.apply(action, Player::X)?;
                    let outcome = next.evaluate();
                    let reward = match outcome {
                        Outcome::Win(Player::X) => 1.0,
                        Outcome::Win(Player::O) => -1.0,
                        Outcome::Draw | Outcome::InProgress => 0.0,
                    };
                    let terminal = outcome.is_terminal();

                    self.table.update(
                        state,
                        action,
                        reward,
                        &next,
                        self.config.alpha,
                        self.config.gamma,
                        terminal,
                    );

                    state = next;
                    turn = if terminal { Turn::Done } else { Turn::Opponent };
                }
                Turn::Opponent => {
                    let moves = state.legal_moves();
                    let Some(&action) = moves.choose(&mut self.rng) else {
                        turn = Turn::Done;
                        continue;
                    };

                    state = state.apply(action, Player::O)?;
                    turn = match state.evaluate() {
                        Outcome::InProgress => Turn::Agent,
                        _ => Turn::Done,
                    };
                }
                Turn::Done => unreachable!("loop exits before entering Done"),
            }
        }

        Ok(state.evaluate())
    }
}
