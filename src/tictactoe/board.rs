//! Board representation and game-state evaluation

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines;

/// A cell on the tic-tac-toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
///
/// The learning agent always plays X; the random opponent and the human
/// play O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// Result of evaluating a board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    InProgress,
}

impl Outcome {
    /// Whether the game is over
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// An immutable 9-cell board snapshot
///
/// Every move produces a new board; the input is never mutated. The type is
/// `Copy` (9 bytes of cells) and hashes structurally, so it serves directly
/// as a value-table key without any separate encoding step.
///
/// Cell indices:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Whether the board has no empty cells left
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Indices of all empty cells, in ascending order
    ///
    /// Legality is defined purely by emptiness; callers that care about
    /// terminal positions evaluate the board first.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place a mark and return the resulting board
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`](crate::Error::InvalidMove) if `pos` is
    /// out of range or the cell is already occupied. Callers that only pass
    /// positions from [`legal_moves`](Self::legal_moves) never hit this; an
    /// occurrence is a contract violation and should be propagated, not
    /// recovered from.
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        if pos >= 9 || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = player.to_cell();
        Ok(next)
    }

    /// Evaluate the position
    ///
    /// Checks the 8 winning triples first, then falls back to [`Outcome::Draw`]
    /// on a full board and [`Outcome::InProgress`] otherwise. Pure; call this
    /// before deciding whether a game continues.
    pub fn evaluate(&self) -> Outcome {
        if lines::has_won(&self.cells, Player::X) {
            return Outcome::Win(Player::X);
        }
        if lines::has_won(&self.cells, Player::O) {
            return Outcome::Win(Player::O);
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Flat 9-character string form, `'-'` for empty cells
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = crate::Error;

    /// Parse a board from its flat string form
    ///
    /// Whitespace is filtered out, so the grid form produced by `Display`
    /// round-trips as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
