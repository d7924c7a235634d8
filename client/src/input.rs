use common::games::tictactoe::{BOARD_SIZE, PlayerMode, Position, SessionCommand};

pub const HELP_TEXT: &str = "\
Commands:
  <row> <col>      place a mark, rows and columns numbered 1-3
  <1-9>            place a mark, cells numbered left to right, top to bottom
  start            start the game (needed when the computer opens)
  undo             take back your last move
  restart [x|o|both]
                   clear the board, optionally switching sides
  help             show this text
  quit             leave the game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Session(SessionCommand),
    Help,
}

/// Parses one line of user input. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<InputCommand>, String> {
    let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        ["start" | "s"] => InputCommand::Session(SessionCommand::Start),
        ["undo" | "u"] => InputCommand::Session(SessionCommand::Undo),
        ["restart" | "r"] => InputCommand::Session(SessionCommand::Restart(None)),
        ["restart" | "r", side] => {
            InputCommand::Session(SessionCommand::Restart(Some(parse_side(side)?)))
        }
        ["help" | "h" | "?"] => InputCommand::Help,
        ["quit" | "q" | "exit"] => InputCommand::Session(SessionCommand::Quit),
        [cell] => InputCommand::Session(SessionCommand::Place(parse_cell_number(cell)?)),
        [row, col] => {
            let pos = Position::new(parse_coordinate(row)?, parse_coordinate(col)?);
            InputCommand::Session(SessionCommand::Place(pos))
        }
        _ => return Err(format!("Unknown command '{}', type 'help'", line.trim())),
    };

    Ok(Some(command))
}

pub fn parse_side(word: &str) -> Result<PlayerMode, String> {
    match word.to_lowercase().as_str() {
        "x" => Ok(PlayerMode::X),
        "o" => Ok(PlayerMode::O),
        "both" | "b" => Ok(PlayerMode::Both),
        other => Err(format!("Unknown side '{}', expected x, o or both", other)),
    }
}

fn parse_cell_number(word: &str) -> Result<Position, String> {
    match word.parse::<usize>() {
        Ok(n @ 1..=9) => Ok(Position::from_index(n - 1)),
        _ => Err(format!("Unknown command '{}', type 'help'", word)),
    }
}

fn parse_coordinate(word: &str) -> Result<usize, String> {
    match word.parse::<usize>() {
        Ok(n) if (1..=BOARD_SIZE).contains(&n) => Ok(n - 1),
        _ => Err(format!("'{}' is not a row or column between 1 and {}", word, BOARD_SIZE)),
    }
}
