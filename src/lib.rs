//! Tabular Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - An immutable tic-tac-toe board model with outcome evaluation
//! - A sparse action-value table with the one-step Q-learning update
//! - Epsilon-greedy and greedy policies with uniform random tie-breaking
//! - A training pipeline that pits the learner against a random opponent
//! - A CLI for training, evaluating, and playing against the agent
//!
//! Training is single-threaded and fully deterministic given a seed: every
//! stochastic choice (exploration, tie-breaks, opponent moves) draws from
//! one injectable generator.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
pub use pipeline::{Evaluation, EvaluationConfig, Trainer, TrainingConfig, TrainingResult};
pub use q_learning::{Policy, QTable, TrainedAgent};
pub use tictactoe::{Board, Cell, Outcome, Player};
