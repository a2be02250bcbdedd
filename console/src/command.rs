use common::games::tictactoe::{CELL_COUNT, Difficulty, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Place(usize),
    Restart,
    Mode(GameMode),
    Difficulty(Difficulty),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Empty command".to_string());
    };
    let argument = parts.next();

    if let Ok(index) = head.parse::<usize>() {
        if index >= CELL_COUNT {
            return Err(format!("Cell must be 0..{}, got {}", CELL_COUNT - 1, index));
        }
        return Ok(ConsoleCommand::Place(index));
    }

    match head.to_ascii_lowercase().as_str() {
        "restart" | "r" => Ok(ConsoleCommand::Restart),
        "mode" => argument
            .ok_or_else(|| "Usage: mode <human-vs-human|human-vs-ai>".to_string())?
            .parse()
            .map(ConsoleCommand::Mode),
        "difficulty" | "level" => argument
            .ok_or_else(|| "Usage: difficulty <easy|medium|hard>".to_string())?
            .parse()
            .map(ConsoleCommand::Difficulty),
        "show" | "board" => Ok(ConsoleCommand::Show),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        other => Err(format!("Unknown command: {}", other)),
    }
}

pub const HELP: &str = "\
Commands:
  0-8                 place your mark (cells are numbered row by row)
  restart             start a new match
  mode <m>            human-vs-human | human-vs-ai (restarts)
  difficulty <d>      easy | medium | hard
  show                print the board
  quit                leave";
