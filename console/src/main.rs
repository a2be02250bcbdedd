mod command;
mod render;

use std::time::Duration;

use clap::Parser;
use common::config::{ConfigStore, MatchConfig, Validate};
use common::games::SessionRng;
use common::games::tictactoe::{
    Difficulty, GameMode, MatchController, MatchSettings, MoveResult,
};
use common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use command::{ConsoleCommand, HELP, parse_command};
use render::{render_board, render_status, render_tally};

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Five-round tic-tac-toe in the terminal")]
struct Args {
    /// YAML file with match defaults; missing file means built-in defaults
    #[arg(long, default_value = "tictactoe_config.yaml")]
    config: String,

    #[arg(long)]
    mode: Option<GameMode>,

    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    ai_delay_ms: Option<u64>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn load_config(args: &Args) -> Result<MatchConfig, String> {
    let store = ConfigStore::from_yaml_file(&args.config);
    let mut config: MatchConfig = store.load()?;

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(ai_delay_ms) = args.ai_delay_ms {
        config.ai_delay_ms = ai_delay_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    if args.save_config {
        store.save(&config)?;
        log!("Settings saved to {}", args.config);
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(&args)?;
    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let round_pause = Duration::from_millis(config.round_pause_ms);

    let mut controller = MatchController::new(MatchSettings::from(&config), rng);
    log!(
        "Match started: {}, {}, seed {}",
        config.mode,
        config.difficulty,
        controller.seed()
    );

    println!("{}", HELP);
    print_state(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Place(index) => {
                let result = controller.place_mark(index);
                if !result.applied {
                    println!("Move at {} not applied", index);
                    continue;
                }
                play_out(&mut controller, result, round_pause).await;
            }
            ConsoleCommand::Restart => {
                controller.restart();
                print_state(&controller);
            }
            ConsoleCommand::Mode(mode) => {
                controller.set_mode(mode);
                print_state(&controller);
            }
            ConsoleCommand::Difficulty(difficulty) => {
                controller.set_difficulty(difficulty);
                print_state(&controller);
            }
            ConsoleCommand::Show => print_state(&controller),
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => break,
        }
    }

    Ok(())
}

/// Runs the timers that follow an applied move: the AI's thinking pause and the
/// pause before the next round.
async fn play_out(controller: &mut MatchController, mut result: MoveResult, round_pause: Duration) {
    if let Some(ai_move) = result.ai_move {
        println!("AI plays {}", ai_move);
    }

    if result.ai_turn_pending {
        print_state(controller);
        tokio::time::sleep(controller.settings().ai_delay).await;
        result = controller.play_ai_turn();
        if let Some(ai_move) = result.ai_move {
            println!("AI plays {}", ai_move);
        }
    }

    print_state(controller);

    let Some(outcome) = result.outcome else {
        return;
    };
    println!("Round result: {}", outcome);

    if result.match_complete {
        if let Some(tally) = controller.final_tally() {
            println!("{}", render_tally(&tally));
        }
        println!("Type `restart` to play again.");
        return;
    }

    tokio::time::sleep(round_pause).await;
    if controller.advance_round() {
        print_state(controller);
    }
}

fn print_state(controller: &MatchController) {
    println!();
    println!("{}", render_board(controller.board()));
    println!("{}", render_status(controller));
}
