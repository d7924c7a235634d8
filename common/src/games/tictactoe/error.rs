use super::types::{Outcome, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeError {
    InvalidInput { rows: usize, cols: usize },
    OutOfBounds(Position),
    InvalidState(Outcome),
    IllegalMove(Position),
    GameOver(Outcome),
    NotYourTurn,
    NotStarted,
    NothingToUndo,
}

impl std::fmt::Display for TicTacToeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicTacToeError::InvalidInput { rows, cols } => {
                write!(f, "Invalid board shape: expected 3x3, got {} rows of width {}", rows, cols)
            }
            TicTacToeError::OutOfBounds(pos) => write!(f, "Position {} is out of bounds", pos),
            TicTacToeError::InvalidState(outcome) => {
                write!(f, "Cannot select a move on a finished board ({})", outcome)
            }
            TicTacToeError::IllegalMove(pos) => write!(f, "Cell {} is already marked", pos),
            TicTacToeError::GameOver(outcome) => write!(f, "Game is already over ({})", outcome),
            TicTacToeError::NotYourTurn => write!(f, "Not your turn"),
            TicTacToeError::NotStarted => write!(f, "Game has not been started"),
            TicTacToeError::NothingToUndo => write!(f, "No moves to undo"),
        }
    }
}

impl std::error::Error for TicTacToeError {}
