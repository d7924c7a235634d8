use super::board::Board;
use super::error::TicTacToeError;
use super::types::{Mark, Outcome, PlayerMode, Position, WinningLine};
use super::win_detector::{check_win_with_line, evaluate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Over(Outcome),
}

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    player_mode: PlayerMode,
    phase: GamePhase,
    history: Vec<Position>,
}

impl TicTacToeGameState {
    pub fn new(player_mode: PlayerMode) -> Self {
        Self {
            board: Board::new(),
            player_mode,
            phase: GamePhase::NotStarted,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_mode(&self) -> PlayerMode {
        self.player_mode
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn history(&self) -> &[Position] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Position> {
        self.history.last().copied()
    }

    pub fn current_mark(&self) -> Mark {
        self.board.side_to_move()
    }

    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn is_bot_turn(&self) -> bool {
        self.phase == GamePhase::InProgress && !self.player_mode.is_human(self.current_mark())
    }

    /// Explicit start. Needed when the computer opens, harmless otherwise.
    pub fn start(&mut self) -> Result<(), TicTacToeError> {
        match self.phase {
            GamePhase::NotStarted => {
                self.phase = GamePhase::InProgress;
                Ok(())
            }
            GamePhase::InProgress => Ok(()),
            GamePhase::Over(outcome) => Err(TicTacToeError::GameOver(outcome)),
        }
    }

    /// A move coming from a person. The first click may start the game,
    /// unless the computer is supposed to open.
    pub fn place_human_mark(&mut self, pos: Position) -> Result<Mark, TicTacToeError> {
        if self.phase == GamePhase::NotStarted && self.player_mode.bot_mark() == Some(Mark::X) {
            return Err(TicTacToeError::NotStarted);
        }
        if !self.player_mode.is_human(self.current_mark()) {
            return Err(TicTacToeError::NotYourTurn);
        }
        self.place_mark(pos)
    }

    pub fn place_mark(&mut self, pos: Position) -> Result<Mark, TicTacToeError> {
        if let GamePhase::Over(outcome) = self.phase {
            return Err(TicTacToeError::GameOver(outcome));
        }

        let mark = self.board.place(pos)?;
        self.history.push(pos);
        self.refresh_phase();
        Ok(mark)
    }

    /// Reverts exactly one committed move.
    pub fn undo_last_move(&mut self) -> Result<Position, TicTacToeError> {
        let pos = self.history.pop().ok_or(TicTacToeError::NothingToUndo)?;
        self.board.clear(pos)?;

        if self.history.is_empty() {
            self.phase = GamePhase::NotStarted;
        } else {
            self.refresh_phase();
        }
        Ok(pos)
    }

    /// One user-facing undo: against the computer this also takes back its reply.
    pub fn undo_turn(&mut self) -> Result<Vec<Position>, TicTacToeError> {
        let mut undone = vec![self.undo_last_move()?];

        if self.player_mode == PlayerMode::Both {
            return Ok(undone);
        }

        let human_plays_x = self.player_mode == PlayerMode::X;
        if !(human_plays_x && self.current_mark() == Mark::X)
            && let Ok(pos) = self.undo_last_move()
        {
            undone.push(pos);
        }

        Ok(undone)
    }

    pub fn restart(&mut self, player_mode: PlayerMode) {
        *self = Self::new(player_mode);
    }

    pub fn status_text(&self) -> String {
        match self.phase {
            GamePhase::NotStarted if self.player_mode == PlayerMode::O => {
                "Type 'start' to let the computer open as X".to_string()
            }
            GamePhase::NotStarted => "Begin by making a move".to_string(),
            GamePhase::InProgress => format!("It's now {}'s turn.", self.current_mark()),
            GamePhase::Over(Outcome::Tie) => "Game Over - It's a tie!".to_string(),
            GamePhase::Over(outcome) => match outcome.winner() {
                Some(mark) => format!("Game Over - {} Wins!", mark),
                None => "Game Over".to_string(),
            },
        }
    }

    fn refresh_phase(&mut self) {
        let outcome = evaluate(&self.board);
        self.phase = if outcome.is_terminal() {
            GamePhase::Over(outcome)
        } else {
            GamePhase::InProgress
        };
    }
}
