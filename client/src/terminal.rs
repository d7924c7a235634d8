use std::fmt::Write;

use common::games::GameBroadcaster;
use common::games::tictactoe::{BOARD_SIZE, Position, SessionSnapshot};

#[derive(Clone, Default)]
pub struct TerminalBroadcaster;

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: SessionSnapshot) {
        println!("{}", render_snapshot(&snapshot));
    }
}

pub fn render_board(snapshot: &SessionSnapshot) -> String {
    let mut out = String::from("    1   2   3\n");
    let rows = snapshot.board.rows();

    for (row, cells) in rows.iter().enumerate() {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, mark)| {
                let highlighted = snapshot.last_move == Some(Position::new(row, col));
                if highlighted {
                    format!("[{}]", mark)
                } else {
                    format!(" {} ", mark)
                }
            })
            .collect();
        let _ = writeln!(out, "{}  {}", row + 1, line.join("|"));
        if row + 1 < BOARD_SIZE {
            out.push_str("   ---+---+---\n");
        }
    }

    out
}

/// Rejections only repeat the reason; the board has not changed.
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    if let Some(message) = &snapshot.message {
        return format!("! {}", message);
    }

    let mut out = render_board(snapshot);
    if let Some(line) = snapshot.winning_line {
        let _ = writeln!(
            out,
            "Winning line: row {} col {} to row {} col {}",
            line.start.row + 1,
            line.start.col + 1,
            line.end.row + 1,
            line.end.col + 1
        );
    }
    if let Some(forecast) = snapshot.forecast {
        let _ = writeln!(out, "Computer expects: {}", forecast);
    }
    if snapshot.bot_thinking {
        out.push_str("Computer is thinking...");
    } else {
        out.push_str(&snapshot.status_text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{
        Board, GamePhase, Mark, Outcome, PlayerMode, WinningLine,
    };

    fn snapshot(board: Board) -> SessionSnapshot {
        SessionSnapshot {
            board,
            phase: GamePhase::InProgress,
            current_mark: board.side_to_move(),
            player_mode: PlayerMode::X,
            last_move: None,
            winning_line: None,
            status_text: format!("It's now {}'s turn.", board.side_to_move()),
            bot_thinking: false,
            forecast: None,
            message: None,
        }
    }

    #[test]
    fn test_render_board_layout() {
        let mut board = Board::new();
        board.place_mark(Position::new(0, 0), Mark::X).unwrap();
        board.place_mark(Position::new(1, 1), Mark::O).unwrap();

        let rendered = render_board(&snapshot(board));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "    1   2   3");
        assert_eq!(lines[1], "1   X |   |   ");
        assert_eq!(lines[2], "   ---+---+---");
        assert_eq!(lines[3], "2     | O |   ");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_highlights_last_move() {
        let mut board = Board::new();
        board.place_mark(Position::new(2, 2), Mark::X).unwrap();
        let mut snap = snapshot(board);
        snap.last_move = Some(Position::new(2, 2));

        let rendered = render_board(&snap);
        assert!(rendered.lines().last().unwrap().ends_with("[X]"));
    }

    #[test]
    fn test_render_game_over_details() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place_mark(Position::new(0, col), Mark::O).unwrap();
        }
        let mut snap = snapshot(board);
        snap.phase = GamePhase::Over(Outcome::OWins);
        snap.winning_line = Some(WinningLine::new(Mark::O, Position::new(0, 0), Position::new(0, 2)));
        snap.forecast = Some(Outcome::OWins);
        snap.status_text = "Game Over - O Wins!".to_string();

        let rendered = render_snapshot(&snap);
        assert!(rendered.contains("Winning line: row 1 col 1 to row 1 col 3"));
        assert!(rendered.contains("Computer expects: O wins"));
        assert!(rendered.ends_with("Game Over - O Wins!"));
    }

    #[test]
    fn test_render_rejection_only_shows_message() {
        let mut snap = snapshot(Board::new());
        snap.message = Some("Not your turn".to_string());
        assert_eq!(render_snapshot(&snap), "! Not your turn");
    }

    #[test]
    fn test_render_thinking() {
        let mut snap = snapshot(Board::new());
        snap.bot_thinking = true;
        assert!(render_snapshot(&snap).ends_with("Computer is thinking..."));
    }
}
