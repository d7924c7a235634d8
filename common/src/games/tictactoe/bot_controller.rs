use crate::games::TieBreaker;
use super::board::Board;
use super::error::TicTacToeError;
use super::types::{Mark, Outcome, Position};
use super::win_detector::evaluate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MoveClass {
    Loss,
    Tie,
    Win,
}

fn classify(result: Outcome, side: Mark) -> MoveClass {
    match result.winner() {
        Some(winner) if winner == side => MoveClass::Win,
        Some(_) => MoveClass::Loss,
        None => MoveClass::Tie,
    }
}

/// Picks the best move for the side to move, breaking ties with `rng`.
pub fn select_move<R: TieBreaker + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<(Position, Outcome), TicTacToeError> {
    let side = board.side_to_move();
    let candidates = score_moves(board)?;

    let Some(best_class) = candidates
        .iter()
        .map(|&(_, result)| classify(result, side))
        .max()
    else {
        return Err(TicTacToeError::InvalidState(evaluate(board)));
    };

    let best: Vec<(Position, Outcome)> = candidates
        .into_iter()
        .filter(|&(_, result)| classify(result, side) == best_class)
        .collect();

    let idx = rng.pick_index(best.len());
    Ok(best[idx])
}

/// Forced result of every legal move, in row-major order.
pub fn score_moves(board: &Board) -> Result<Vec<(Position, Outcome)>, TicTacToeError> {
    let status = evaluate(board);
    if status.is_terminal() {
        return Err(TicTacToeError::InvalidState(status));
    }

    let side = board.side_to_move();
    Ok(board
        .available_moves()
        .into_iter()
        .map(|pos| (pos, play_out(&board.with_mark(pos, side))))
        .collect())
}

/// Game-theoretic value of `board` under optimal play from both sides.
pub fn forced_outcome(board: &Board) -> Result<Outcome, TicTacToeError> {
    let status = evaluate(board);
    if status.is_terminal() {
        return Err(TicTacToeError::InvalidState(status));
    }
    Ok(play_out(board))
}

fn play_out(board: &Board) -> Outcome {
    let status = evaluate(board);
    if status.is_terminal() {
        return status;
    }

    let side = board.side_to_move();
    let mut best: Option<(MoveClass, Outcome)> = None;

    for pos in board.available_moves() {
        let result = play_out(&board.with_mark(pos, side));
        let class = classify(result, side);
        if class == MoveClass::Win {
            return result;
        }
        if best.is_none_or(|(best_class, _)| class > best_class) {
            best = Some((class, result));
        }
    }

    best.map_or(Outcome::Tie, |(_, result)| result)
}
