//! Training and evaluation pipelines
//!
//! This module provides the episode-driving machinery:
//! - Training a fresh value table against a random opponent
//! - Evaluating the resulting greedy policy over fresh games
//! - Observing training progress without coupling the loop to any output

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{Evaluation, EvaluationConfig};
pub use observers::ProgressObserver;
pub use training::{Trainer, TrainingConfig, TrainingResult};

pub use crate::ports::Observer;
