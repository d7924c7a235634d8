use tokio::sync::mpsc;

use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::board::Board;
use super::bot_controller::select_move;
use super::error::TicTacToeError;
use super::game_state::{GamePhase, TicTacToeGameState};
use super::settings::TicTacToeSessionSettings;
use super::types::{Mark, Outcome, PlayerMode, Position, WinningLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Place(Position),
    Undo,
    Restart(Option<PlayerMode>),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub board: Board,
    pub phase: GamePhase,
    pub current_mark: Mark,
    pub player_mode: PlayerMode,
    pub last_move: Option<Position>,
    pub winning_line: Option<WinningLine>,
    pub status_text: String,
    pub bot_thinking: bool,
    /// Result the computer expects from its last move.
    pub forecast: Option<Outcome>,
    /// Why the most recent command was rejected, if it was.
    pub message: Option<String>,
}

impl SessionSnapshot {
    fn capture(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            phase: state.phase(),
            current_mark: state.current_mark(),
            player_mode: state.player_mode(),
            last_move: state.last_move(),
            winning_line: state.winning_line(),
            status_text: state.status_text(),
            bot_thinking: false,
            forecast: None,
            message: None,
        }
    }

    pub fn awaiting_human(&self) -> bool {
        match self.phase {
            GamePhase::Over(_) => false,
            GamePhase::NotStarted => self.player_mode != PlayerMode::O,
            GamePhase::InProgress => !self.bot_thinking && self.player_mode.is_human(self.current_mark),
        }
    }
}

enum CommandResult {
    Applied,
    Rejected(String),
    Quit,
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Drives one local game until `Quit` or until the command channel closes.
    pub async fn run<B: GameBroadcaster>(
        settings: TicTacToeSessionSettings,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: B,
    ) -> TicTacToeGameState {
        let mut state = TicTacToeGameState::new(settings.player_mode);
        let mut rng = settings.seed.map_or_else(SessionRng::from_random, SessionRng::new);
        log!("Session started: mode {:?}, seed {}", settings.player_mode, rng.seed());

        broadcaster.broadcast_state(SessionSnapshot::capture(&state)).await;

        loop {
            if state.is_bot_turn() {
                let mut thinking = SessionSnapshot::capture(&state);
                thinking.bot_thinking = true;
                broadcaster.broadcast_state(thinking).await;

                if !wait_bot_delay(&settings, &state, &mut command_rx, &broadcaster).await {
                    break;
                }

                let board = *state.board();
                let calculated = tokio::task::spawn_blocking(move || {
                    let result = select_move(&board, &mut rng);
                    (rng, result)
                })
                .await;

                let forecast = match calculated {
                    Ok((returned_rng, Ok((pos, forecast)))) => {
                        rng = returned_rng;
                        match state.place_mark(pos) {
                            Ok(mark) => {
                                log!("Computer played {} at {}, expects {}", mark, pos, forecast);
                                Some(forecast)
                            }
                            Err(e) => {
                                log!("Computer move {} rejected: {}", pos, e);
                                break;
                            }
                        }
                    }
                    Ok((_, Err(e))) => {
                        log!("Move selection failed: {}", e);
                        break;
                    }
                    Err(e) => {
                        log!("Move selection task failed: {}", e);
                        break;
                    }
                };

                let mut snapshot = SessionSnapshot::capture(&state);
                snapshot.forecast = forecast;
                broadcaster.broadcast_state(snapshot).await;
                continue;
            }

            let Some(command) = command_rx.recv().await else {
                break;
            };

            let snapshot = match handle_command(&mut state, command) {
                CommandResult::Applied => SessionSnapshot::capture(&state),
                CommandResult::Rejected(reason) => {
                    let mut snapshot = SessionSnapshot::capture(&state);
                    snapshot.message = Some(reason);
                    snapshot
                }
                CommandResult::Quit => break,
            };
            broadcaster.broadcast_state(snapshot).await;
        }

        log!("Session finished after {} moves: {}", state.history().len(), state.outcome());
        state
    }
}

/// Pacing pause before the computer moves. Returns `false` if the session should end.
/// The board is not touched while waiting; anything but `Quit` is turned away.
async fn wait_bot_delay<B: GameBroadcaster>(
    settings: &TicTacToeSessionSettings,
    state: &TicTacToeGameState,
    command_rx: &mut mpsc::UnboundedReceiver<SessionCommand>,
    broadcaster: &B,
) -> bool {
    let delay = tokio::time::sleep(settings.bot_delay());
    tokio::pin!(delay);

    loop {
        tokio::select! {
            _ = &mut delay => return true,
            command = command_rx.recv() => match command {
                None | Some(SessionCommand::Quit) => return false,
                Some(command) => {
                    log!("Ignoring {:?} while the computer is thinking", command);
                    let mut snapshot = SessionSnapshot::capture(state);
                    snapshot.bot_thinking = true;
                    snapshot.message = Some(TicTacToeError::NotYourTurn.to_string());
                    broadcaster.broadcast_state(snapshot).await;
                }
            }
        }
    }
}

fn handle_command(state: &mut TicTacToeGameState, command: SessionCommand) -> CommandResult {
    let result = match command {
        SessionCommand::Start => state.start(),
        SessionCommand::Place(pos) => state.place_human_mark(pos).map(|mark| {
            log!("{} played at {}", mark, pos);
        }),
        SessionCommand::Undo => state.undo_turn().map(|undone| {
            log!("Undid {} move(s)", undone.len());
        }),
        SessionCommand::Restart(mode) => {
            let mode = mode.unwrap_or(state.player_mode());
            state.restart(mode);
            log!("Restarted with mode {:?}", mode);
            Ok(())
        }
        SessionCommand::Quit => return CommandResult::Quit,
    };

    match result {
        Ok(()) => CommandResult::Applied,
        Err(e) => {
            log!("Rejected {:?}: {}", command, e);
            CommandResult::Rejected(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::win_detector::evaluate;

    #[derive(Clone)]
    struct ChannelBroadcaster {
        tx: mpsc::UnboundedSender<SessionSnapshot>,
    }

    impl GameBroadcaster for ChannelBroadcaster {
        async fn broadcast_state(&self, snapshot: SessionSnapshot) {
            let _ = self.tx.send(snapshot);
        }
    }

    struct Harness {
        commands: mpsc::UnboundedSender<SessionCommand>,
        snapshots: mpsc::UnboundedReceiver<SessionSnapshot>,
        handle: tokio::task::JoinHandle<TicTacToeGameState>,
    }

    fn spawn_session(player_mode: PlayerMode, seed: u64) -> Harness {
        let settings = TicTacToeSessionSettings {
            player_mode,
            bot_delay_ms: 500,
            seed: Some(seed),
        };
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (tx, snapshots) = mpsc::unbounded_channel();
        let handle = tokio::spawn(TicTacToeSession::run(settings, command_rx, ChannelBroadcaster { tx }));
        Harness { commands, snapshots, handle }
    }

    impl Harness {
        async fn next_where(&mut self, pred: impl Fn(&SessionSnapshot) -> bool) -> SessionSnapshot {
            loop {
                let snapshot = self.snapshots.recv().await.expect("session closed");
                if pred(&snapshot) {
                    return snapshot;
                }
            }
        }

        async fn finish(self) -> TicTacToeGameState {
            let _ = self.commands.send(SessionCommand::Quit);
            self.handle.await.unwrap()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_answers_human_move() {
        let mut harness = spawn_session(PlayerMode::X, 1);
        let initial = harness.next_where(|_| true).await;
        assert!(initial.awaiting_human());

        harness.commands.send(SessionCommand::Place(Position::new(1, 1))).unwrap();
        let thinking = harness.next_where(|s| s.bot_thinking).await;
        assert_eq!(thinking.current_mark, Mark::O);

        let answered = harness.next_where(|s| s.forecast.is_some()).await;
        assert_eq!(answered.forecast, Some(Outcome::Tie));
        assert_eq!(answered.current_mark, Mark::X);
        assert!(answered.awaiting_human());

        let state = harness.finish().await;
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[0], Position::new(1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_during_bot_delay_is_ignored() {
        let mut harness = spawn_session(PlayerMode::X, 2);
        harness.commands.send(SessionCommand::Place(Position::new(0, 0))).unwrap();
        harness.next_where(|s| s.bot_thinking && s.message.is_none()).await;

        harness.commands.send(SessionCommand::Place(Position::new(2, 2))).unwrap();
        harness.commands.send(SessionCommand::Undo).unwrap();
        let rejected = harness.next_where(|s| s.message.is_some()).await;
        assert_eq!(rejected.message.as_deref(), Some("Not your turn"));
        assert_eq!(rejected.board.occupied_count(), 1);

        harness.next_where(|s| s.forecast.is_some()).await;
        let state = harness.finish().await;
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[0], Position::new(0, 0));
        // Opening in a corner leaves the centre as the only drawing reply.
        assert_eq!(state.history()[1], Position::new(1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_playing_o_computer_opens_after_start() {
        let mut harness = spawn_session(PlayerMode::O, 3);
        let initial = harness.next_where(|_| true).await;
        assert!(!initial.awaiting_human());

        harness.commands.send(SessionCommand::Place(Position::new(0, 0))).unwrap();
        let rejected = harness.next_where(|s| s.message.is_some()).await;
        assert_eq!(rejected.message.as_deref(), Some("Game has not been started"));

        harness.commands.send(SessionCommand::Start).unwrap();
        let opened = harness.next_where(|s| s.forecast.is_some()).await;
        assert_eq!(opened.board.occupied_count(), 1);
        assert_eq!(opened.current_mark, Mark::O);

        let state = harness.finish().await;
        assert_eq!(state.phase(), GamePhase::InProgress);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_mode_never_calls_computer() {
        let mut harness = spawn_session(PlayerMode::Both, 4);
        harness.commands.send(SessionCommand::Place(Position::new(0, 0))).unwrap();
        harness.commands.send(SessionCommand::Place(Position::new(1, 1))).unwrap();
        harness.commands.send(SessionCommand::Undo).unwrap();
        harness.next_where(|s| s.board.occupied_count() == 2).await;
        let after_undo = harness.next_where(|s| s.board.occupied_count() == 1).await;
        assert_eq!(after_undo.current_mark, Mark::O);

        let state = harness.finish().await;
        assert_eq!(state.history(), &[Position::new(0, 0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_naive_human_never_beats_computer() {
        for seed in 0..4 {
            let mut harness = spawn_session(PlayerMode::X, seed);
            let final_snapshot = loop {
                let snapshot = harness.next_where(|_| true).await;
                if let GamePhase::Over(_) = snapshot.phase {
                    break snapshot;
                }
                if snapshot.awaiting_human() && snapshot.message.is_none() {
                    let pos = snapshot.board.available_moves()[0];
                    harness.commands.send(SessionCommand::Place(pos)).unwrap();
                }
            };

            assert_ne!(evaluate(&final_snapshot.board), Outcome::XWins);
            harness.finish().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_board() {
        let mut harness = spawn_session(PlayerMode::Both, 5);
        harness.commands.send(SessionCommand::Place(Position::new(2, 0))).unwrap();
        harness.commands.send(SessionCommand::Restart(Some(PlayerMode::X))).unwrap();
        let restarted = harness.next_where(|s| s.player_mode == PlayerMode::X).await;
        assert_eq!(restarted.phase, GamePhase::NotStarted);
        assert_eq!(restarted.board, Board::new());
        harness.finish().await;
    }
}
