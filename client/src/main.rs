mod config;
mod input;
mod terminal;

use std::path::PathBuf;

use clap::Parser;
use common::games::tictactoe::{PlayerMode, SessionCommand, TicTacToeSession};
use common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use config::{CONFIG_FILE, Validate, get_config_manager};
use input::{HELP_TEXT, InputCommand, parse_command, parse_side};
use terminal::TerminalBroadcaster;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe against an unbeatable computer")]
struct Args {
    /// YAML config file; missing files fall back to defaults
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Side to play: x, o or both
    #[arg(long, value_parser = parse_side)]
    side: Option<PlayerMode>,

    #[arg(long)]
    bot_delay_ms: Option<u64>,

    /// Fixed seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(side) = args.side {
        config.session.player_mode = side;
    }
    if let Some(delay) = args.bot_delay_ms {
        config.session.bot_delay_ms = delay;
    }
    if args.seed.is_some() {
        config.session.seed = args.seed;
    }
    config.verbose |= args.verbose;
    config.use_log_prefix |= args.use_log_prefix;
    config.validate()?;

    if config.verbose {
        let prefix = config.use_log_prefix.then(|| "Client".to_string());
        logger::init_logger(prefix);
    }
    log!("Loaded config from {}", args.config.display());

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved config to {}", args.config.display());
    }

    println!("{}\n", HELP_TEXT);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let mut session = tokio::spawn(TicTacToeSession::run(
        config.session.clone(),
        command_rx,
        TerminalBroadcaster,
    ));

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    let mut stdin_open = true;

    loop {
        tokio::select! {
            result = &mut session => {
                let state = result?;
                log!("Game closed with {} moves on the board", state.history().len());
                break;
            }
            line = lines.next(), if stdin_open => match line {
                Some(Ok(line)) => match parse_command(&line) {
                    Ok(Some(InputCommand::Session(command))) => {
                        if command_tx.send(command).is_err() {
                            log!("Session stopped accepting commands");
                        }
                    }
                    Ok(Some(InputCommand::Help)) => println!("{}", HELP_TEXT),
                    Ok(None) => {}
                    Err(message) => println!("! {}", message),
                },
                Some(Err(e)) => {
                    log!("Failed to read input: {}", e);
                    stdin_open = false;
                    let _ = command_tx.send(SessionCommand::Quit);
                }
                None => {
                    stdin_open = false;
                    let _ = command_tx.send(SessionCommand::Quit);
                }
            },
        }
    }

    Ok(())
}
