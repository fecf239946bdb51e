//! Action selection over the value table

use rand::{Rng, seq::IndexedRandom};

use crate::{q_learning::QTable, tictactoe::Board};

/// Action-selection policy over the legal moves of a board
///
/// With probability `epsilon` a uniformly random legal move is explored;
/// otherwise the policy exploits by picking uniformly among the legal moves
/// that share the maximum Q-value. The uniform tie-break matters: always
/// taking the lowest-indexed maximum would bias the learner toward early
/// cells whenever several moves look equally good.
///
/// All randomness (exploration and tie-break) comes from the generator
/// passed to [`select`](Self::select), so seeded runs replay exactly.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    epsilon: f64,
}

impl Policy {
    /// Epsilon-greedy policy for training
    pub fn epsilon_greedy(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Pure exploitation policy for deployment
    pub fn greedy() -> Self {
        Self { epsilon: 0.0 }
    }

    /// Exploration probability
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select a move for `state`, or `None` when the board is full
    ///
    /// An empty move set is a valid signal, not an error.
    pub fn select<R: Rng>(&self, table: &QTable, state: &Board, rng: &mut R) -> Option<usize> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return None;
        }

        if rng.random::<f64>() < self.epsilon {
            // Explore: uniformly random legal move
            return moves.choose(rng).copied();
        }

        // Exploit: uniformly among the moves tied at the maximum Q-value
        let mut best = f64::NEG_INFINITY;
        let mut tied: Vec<usize> = Vec::new();
        for &action in &moves {
            let q = table.get(state, action);
            if q > best {
                best = q;
                tied.clear();
                tied.push(action);
            } else if q == best {
                tied.push(action);
            }
        }

        tied.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_full_board_yields_no_action() {
        let table = QTable::new();
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(Policy::greedy().select(&table, &board, &mut rng), None);
        assert_eq!(
            Policy::epsilon_greedy(1.0).select(&table, &board, &mut rng),
            None
        );
    }

    #[test]
    fn test_pure_exploration_is_roughly_uniform() {
        let table = QTable::new();
        let board: Board = "XO-------".parse().unwrap();
        let policy = Policy::epsilon_greedy(1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let legal = board.legal_moves();
        let trials = 7000;
        let mut counts = [0usize; 9];
        for _ in 0..trials {
            let action = policy.select(&table, &board, &mut rng).unwrap();
            counts[action] += 1;
        }

        assert_eq!(counts[0], 0);
        assert_eq!(counts[1], 0);

        let expected = trials as f64 / legal.len() as f64;
        for &action in &legal {
            let deviation = (counts[action] as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.25,
                "action {action} drawn {} times, expected ~{expected}",
                counts[action]
            );
        }
    }

    #[test]
    fn test_greedy_never_picks_a_submaximal_move() {
        let mut table = QTable::new();
        let board = Board::new();
        table.set(board, 4, 1.0);
        table.set(board, 0, 1.0);
        table.set(board, 8, -0.5);

        let policy = Policy::greedy();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let action = policy.select(&table, &board, &mut rng).unwrap();
            assert!(action == 0 || action == 4, "picked submaximal {action}");
        }
    }

    #[test]
    fn test_tie_break_reaches_every_tied_move() {
        let mut table = QTable::new();
        let board = Board::new();
        table.set(board, 1, 0.5);
        table.set(board, 4, 0.5);
        table.set(board, 7, 0.5);

        let policy = Policy::greedy();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[policy.select(&table, &board, &mut rng).unwrap()] = true;
        }

        assert!(seen[1] && seen[4] && seen[7]);
        for (action, was_seen) in seen.iter().enumerate() {
            if ![1, 4, 7].contains(&action) {
                assert!(!was_seen, "tie-break leaked to action {action}");
            }
        }
    }

    #[test]
    fn test_exploitation_tracks_learned_values() {
        let mut table = QTable::new();
        let board = Board::new().apply(0, Player::X).unwrap();
        table.set(board, 4, 2.0);

        let policy = Policy::greedy();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(policy.select(&table, &board, &mut rng), Some(4));
        }
    }
}
