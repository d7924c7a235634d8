mod board;
mod bot_controller;
mod error;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CELL_COUNT};
pub use bot_controller::{forced_outcome, score_moves, select_move};
pub use error::TicTacToeError;
pub use game_state::{GamePhase, TicTacToeGameState};
pub use session::{SessionCommand, SessionSnapshot, TicTacToeSession};
pub use settings::{DEFAULT_BOT_DELAY_MS, MAX_BOT_DELAY_MS, TicTacToeSessionSettings};
pub use types::{Mark, Outcome, PlayerMode, Position, WinningLine};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line, evaluate, evaluate_rows};
