mod board;
mod bot_controller;
mod game_state;
mod match_controller;
mod settings;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, empty_cells, is_full, is_valid_move};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move, minimax};
pub use game_state::TicTacToeGameState;
pub use match_controller::{AI_MARK, HUMAN_MARK, MatchController, ROUNDS_PER_MATCH};
pub use settings::MatchSettings;
pub use types::{
    Difficulty, GameMode, GameStatus, Mark, MatchPhase, MatchTally, MoveResult, RoundOutcome,
};
pub use win_detector::{WIN_PATTERNS, winner_of, winning_pattern};
