use common::games::tictactoe::{
    BOARD_SIZE, Board, Mark, MatchController, MatchPhase, MatchTally, ROUNDS_PER_MATCH,
};

/// Board with cell numbers in the empty squares.
pub fn render_board(board: &Board) -> String {
    let rows: Vec<String> = (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|column| {
                    let index = row * BOARD_SIZE + column;
                    match board.cell(index) {
                        Mark::Empty => index.to_string(),
                        mark => mark.to_string(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect();
    rows.join("\n--+---+--\n")
}

pub fn render_status(controller: &MatchController) -> String {
    match controller.phase() {
        MatchPhase::MatchComplete => "Match over".to_string(),
        MatchPhase::Resolved | MatchPhase::RoundTransition => {
            format!("Round {} of {} finished", controller.round() + 1, ROUNDS_PER_MATCH)
        }
        MatchPhase::AwaitingMove => format!(
            "Round {} of {}, {} to move",
            controller.round() + 1,
            ROUNDS_PER_MATCH,
            controller.current_mark()
        ),
    }
}

pub fn render_tally(tally: &MatchTally) -> String {
    format!(
        "FINAL RESULTS\nX wins: {}\nO wins: {}\nDraws: {}",
        tally.x_wins, tally.o_wins, tally.draws
    )
}
