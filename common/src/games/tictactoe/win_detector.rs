use super::board::Board;
use super::error::TicTacToeError;
use super::types::{Mark, Outcome, Position, WinningLine};

const fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

/// Columns, rows, then diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    [p(0, 0), p(1, 0), p(2, 0)],
    [p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 2), p(1, 2), p(2, 2)],
    [p(0, 0), p(0, 1), p(0, 2)],
    [p(1, 0), p(1, 1), p(1, 2)],
    [p(2, 0), p(2, 1), p(2, 2)],
    [p(0, 0), p(1, 1), p(2, 2)],
    [p(0, 2), p(1, 1), p(2, 0)],
];

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_win(board) {
        return mark.as_winner();
    }

    if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::Undecided
    }
}

/// Same as [`evaluate`] for callers holding raw row data.
pub fn evaluate_rows(rows: &[Vec<Mark>]) -> Result<Outcome, TicTacToeError> {
    Board::from_rows(rows).map(|board| evaluate(&board))
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.rows();

    for [a, b, c] in WINNING_LINES {
        let mark = cells[a.row][a.col];
        if mark == Mark::Empty {
            continue;
        }
        if cells[b.row][b.col] == mark && cells[c.row][c.col] == mark {
            return Some(WinningLine::new(mark, a, c));
        }
    }

    None
}
