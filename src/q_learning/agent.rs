//! Deployment wrapper around a learned value table

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    q_learning::{Policy, QTable},
    tictactoe::Board,
};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// A trained agent that plays greedily from its value table
///
/// Produced by [`Trainer::into_agent`](crate::pipeline::Trainer::into_agent)
/// once training completes. The table is frozen: playing games through this
/// type never updates a Q-value. The generator only breaks ties among
/// equally-valued moves.
#[derive(Debug, Clone)]
pub struct TrainedAgent {
    table: QTable,
    rng: StdRng,
}

impl TrainedAgent {
    /// Wrap a learned table, seeding the tie-break generator
    pub fn new(table: QTable, seed: Option<u64>) -> Self {
        Self {
            table,
            rng: build_rng(seed),
        }
    }

    /// Best known move for `state`, or `None` when the board is full
    pub fn best_move(&mut self, state: &Board) -> Option<usize> {
        Policy::greedy().select(&self.table, state, &mut self.rng)
    }

    /// The learned value table
    pub fn q_table(&self) -> &QTable {
        &self.table
    }
}
