use super::board::Board;
use super::types::Mark;

/// Rows, then columns, then the two diagonals.
pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn winner_of(board: &Board) -> Option<Mark> {
    winning_pattern(board).map(|pattern| board.cell(pattern[0]))
}

/// First pattern in table order held entirely by one mark.
pub fn winning_pattern(board: &Board) -> Option<[usize; 3]> {
    WIN_PATTERNS.iter().copied().find(|&[a, b, c]| {
        let mark = board.cell(a);
        mark != Mark::Empty && mark == board.cell(b) && mark == board.cell(c)
    })
}
