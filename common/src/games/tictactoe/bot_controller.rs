use crate::games::SessionRng;
use super::board::{Board, empty_cells, is_full};
use super::types::{Difficulty, Mark};
use super::win_detector::winner_of;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, current_mark: Mark) -> Self {
        Self {
            board,
            current_mark,
        }
    }
}

/// Picks the bot's next cell. `None` only when the board has no empty cell.
///
/// Panics if the board already has a winner or the bot has no mark: the caller
/// checks terminal state after every placement, so reaching this is a controller bug.
pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Option<usize> {
    assert!(
        input.current_mark != Mark::Empty,
        "bot must play X or O"
    );
    assert!(
        winner_of(&input.board).is_none(),
        "bot asked to move on a finished board:\n{}",
        input.board
    );

    match difficulty {
        Difficulty::Easy => calculate_random_move(input, rng),
        Difficulty::Medium => calculate_heuristic_move(input, rng),
        Difficulty::Hard => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&empty_cells(&input.board))
}

/// One-ply lookahead: win if possible, else block, else random. Forks go unseen.
fn calculate_heuristic_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = empty_cells(&input.board);

    if let Some(index) = find_winning_move(&input.board, bot_mark, &available_moves) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&input.board, opponent_mark, &available_moves) {
        return Some(index);
    }

    calculate_random_move(input, rng)
}

pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    let bot_mark = input.current_mark;
    let available_moves = empty_cells(&input.board);

    if available_moves.is_empty() {
        return None;
    }

    if let Some(index) = find_winning_move(&input.board, bot_mark, &available_moves) {
        return Some(index);
    }

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in available_moves {
        let board = input.board.with_mark(index, bot_mark);
        let score = minimax(&board, false, bot_mark);

        // Strictly greater: the lowest index keeps ties.
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves
        .iter()
        .copied()
        .find(|&index| winner_of(&board.with_mark(index, mark)) == Some(mark))
}

/// Exhaustive game value from the bot's point of view: +1 win, -1 loss, 0 draw.
pub fn minimax(board: &Board, is_maximizing: bool, bot_mark: Mark) -> i32 {
    if let Some(winner) = winner_of(board) {
        return if winner == bot_mark { 1 } else { -1 };
    }

    if is_full(board) {
        return 0;
    }

    let Some(opponent_mark) = bot_mark.opponent() else {
        return 0;
    };

    let mover = if is_maximizing { bot_mark } else { opponent_mark };
    let scores = empty_cells(board)
        .into_iter()
        .map(|index| minimax(&board.with_mark(index, mover), !is_maximizing, bot_mark));

    let best = if is_maximizing { scores.max() } else { scores.min() };
    best.unwrap_or(0)
}
