//! Sparse action-value table and the temporal difference update

use std::collections::HashMap;

use crate::tictactoe::Board;

/// Action-value table mapping (board, move position) pairs to Q-values
///
/// Absent entries read as 0.0, so unseen state-action pairs start neutral.
/// Entries are created on first update and never evicted; the tic-tac-toe
/// state space is small enough that the table simply grows monotonically.
/// Only the training loop writes to it.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<(Board, usize), f64>,
}

impl QTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get the Q-value for a state-action pair, 0.0 if never set
    pub fn get(&self, state: &Board, action: usize) -> f64 {
        self.values.get(&(*state, action)).copied().unwrap_or(0.0)
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: Board, action: usize, value: f64) {
        self.values.insert((state, action), value);
    }

    /// Maximum Q-value over the given actions, `None` when empty
    pub fn max_q(&self, state: &Board, actions: &[usize]) -> Option<f64> {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(None, |best, q| Some(best.map_or(q, |b: f64| b.max(q))))
    }

    /// Q-learning update: off-policy one-step TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// When `terminal` is true the bootstrap term is dropped and the target
    /// is the bare reward. A next state with no legal moves contributes a
    /// future value of 0.0. `alpha` and `gamma` come from the run
    /// configuration; the table holds no hyperparameters of its own.
    pub fn update(
        &mut self,
        state: Board,
        action: usize,
        reward: f64,
        next_state: &Board,
        alpha: f64,
        gamma: f64,
        terminal: bool,
    ) {
        let current = self.get(&state, action);
        let target = if terminal {
            reward
        } else {
            let best_next = self
                .max_q(next_state, &next_state.legal_moves())
                .unwrap_or(0.0);
            reward + gamma * best_next
        };
        let td_error = target - current;
        self.set(state, action, current + alpha * td_error);
    }

    /// Number of stored Q-values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether any Q-value has been stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_unseen_pairs_default_to_zero() {
        let table = QTable::new();
        let state = Board::new();
        assert_eq!(table.get(&state, 0), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_get() {
        let mut table = QTable::new();
        let state = Board::new();
        table.set(state, 4, 1.5);
        assert_eq!(table.get(&state, 4), 1.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_max_q() {
        let mut table = QTable::new();
        let state = Board::new();
        table.set(state, 0, 0.5);
        table.set(state, 1, 1.5);
        table.set(state, 2, 0.8);

        assert_eq!(table.max_q(&state, &[0, 1, 2]), Some(1.5));
        assert_eq!(table.max_q(&state, &[]), None);
        // Unstored actions count as 0.0
        assert_eq!(table.max_q(&state, &[7, 8]), Some(0.0));
    }

    #[test]
    fn test_terminal_update_with_full_learning_rate() {
        let mut table = QTable::new();
        let state = Board::new();
        let next = state.apply(4, Player::X).unwrap();

        table.update(state, 4, 1.0, &next, 1.0, 0.9, true);
        assert_eq!(table.get(&state, 4), 1.0);
    }

    #[test]
    fn test_update_with_zero_alpha_is_a_no_op() {
        let mut table = QTable::new();
        let state = Board::new();
        let next = state.apply(4, Player::X).unwrap();
        table.set(state, 4, 0.25);

        table.update(state, 4, 1.0, &next, 0.0, 0.9, true);
        assert_eq!(table.get(&state, 4), 0.25);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_non_terminal_update_bootstraps_from_next_state() {
        let mut table = QTable::new();
        let state = Board::new();
        let next = state.apply(4, Player::X).unwrap();

        table.set(next, 0, 2.0);
        table.set(next, 1, 1.0);

        table.update(state, 4, 0.0, &next, 0.5, 0.9, false);

        // Q(s,4) = 0.0 + 0.5 * (0.0 + 0.9 * 2.0 - 0.0) = 0.9
        assert!((table.get(&state, 4) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_non_terminal_update_with_exhausted_next_state() {
        let mut table = QTable::new();
        let state: Board = "XOXXOOOX-".parse().unwrap();
        let next: Board = "XOXXOOOXX".parse().unwrap();

        // No legal moves in the next state: future value is 0.0
        table.update(state, 8, 0.5, &next, 1.0, 0.9, false);
        assert_eq!(table.get(&state, 8), 0.5);
    }
}
