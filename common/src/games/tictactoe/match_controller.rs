use crate::games::SessionRng;
use crate::log;
use super::board::{Board, is_valid_move};
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::TicTacToeGameState;
use super::settings::MatchSettings;
use super::types::{
    Difficulty, GameMode, Mark, MatchPhase, MatchTally, MoveResult, RoundOutcome,
};

pub const ROUNDS_PER_MATCH: usize = 5;
pub const HUMAN_MARK: Mark = Mark::X;
pub const AI_MARK: Mark = Mark::O;

/// Owns a five-round match and routes every state change through its commands.
///
/// Rejected commands leave the match untouched and report `applied == false`.
pub struct MatchController {
    settings: MatchSettings,
    game_state: TicTacToeGameState,
    round: usize,
    outcomes: Vec<RoundOutcome>,
    phase: MatchPhase,
    locked: bool,
    ai_turn_pending: bool,
    rng: SessionRng,
}

impl MatchController {
    pub fn new(settings: MatchSettings, rng: SessionRng) -> Self {
        Self {
            settings,
            game_state: TicTacToeGameState::new(),
            round: 0,
            outcomes: Vec::with_capacity(ROUNDS_PER_MATCH),
            phase: MatchPhase::AwaitingMove,
            locked: false,
            ai_turn_pending: false,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.game_state.board
    }

    pub fn current_mark(&self) -> Mark {
        self.game_state.current_mark
    }

    pub fn last_move(&self) -> Option<usize> {
        self.game_state.last_move
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn outcomes(&self) -> &[RoundOutcome] {
        &self.outcomes
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_ai_turn_pending(&self) -> bool {
        self.ai_turn_pending
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Counts so far; see `final_tally` for the match result.
    pub fn tally(&self) -> MatchTally {
        MatchTally::from_outcomes(&self.outcomes)
    }

    pub fn final_tally(&self) -> Option<MatchTally> {
        (self.phase == MatchPhase::MatchComplete).then(|| self.tally())
    }

    /// Human move at `index`. In human-vs-ai mode a zero AI delay plays the reply
    /// before returning; otherwise the reply waits for `play_ai_turn`.
    pub fn place_mark(&mut self, index: usize) -> MoveResult {
        if !self.accepts_human_move(index) {
            return MoveResult::rejected();
        }

        let Some(outcome) = self.apply_move(index) else {
            return MoveResult::rejected();
        };

        let mut result = MoveResult {
            applied: true,
            outcome,
            match_complete: self.phase == MatchPhase::MatchComplete,
            ai_move: None,
            ai_turn_pending: false,
        };

        if outcome.is_none() && self.is_ai_to_move() {
            self.locked = true;
            self.ai_turn_pending = true;

            if self.settings.ai_delay.is_zero() {
                let reply = self.play_ai_turn();
                result.ai_move = reply.ai_move;
                result.outcome = reply.outcome;
                result.match_complete = reply.match_complete;
            } else {
                result.ai_turn_pending = true;
            }
        }

        result
    }

    /// Deferred AI trigger. Ignored unless an AI turn is waiting, so a timer that
    /// fires after a restart does nothing.
    pub fn play_ai_turn(&mut self) -> MoveResult {
        if !self.ai_turn_pending || self.phase != MatchPhase::AwaitingMove {
            return MoveResult::rejected();
        }
        self.ai_turn_pending = false;

        let input = BotInput::new(self.game_state.board, self.game_state.current_mark);
        let Some(index) = calculate_move(self.settings.difficulty, &input, &mut self.rng) else {
            self.locked = false;
            return MoveResult::rejected();
        };

        let Some(outcome) = self.apply_move(index) else {
            self.locked = false;
            return MoveResult::rejected();
        };

        if outcome.is_none() {
            self.locked = false;
        }

        MoveResult {
            applied: true,
            outcome,
            match_complete: self.phase == MatchPhase::MatchComplete,
            ai_move: Some(index),
            ai_turn_pending: false,
        }
    }

    /// Starts the next round after a resolved one. Returns false in any other phase.
    pub fn advance_round(&mut self) -> bool {
        if self.phase != MatchPhase::Resolved {
            return false;
        }

        self.phase = MatchPhase::RoundTransition;
        self.round += 1;
        self.game_state = TicTacToeGameState::new();
        self.locked = false;
        self.ai_turn_pending = false;
        self.phase = MatchPhase::AwaitingMove;

        log!("Round {} of {} started", self.round + 1, ROUNDS_PER_MATCH);
        true
    }

    pub fn restart(&mut self) {
        self.round = 0;
        self.outcomes.clear();
        self.game_state = TicTacToeGameState::new();
        self.locked = false;
        self.ai_turn_pending = false;
        self.phase = MatchPhase::AwaitingMove;

        log!(
            "Match restarted ({}, {})",
            self.settings.mode,
            self.settings.difficulty
        );
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        log!("Game mode set to {}", mode);
        self.settings.mode = mode;
        self.restart();
    }

    /// Difficulty only matters against the AI, so other modes keep their match.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log!("Difficulty set to {}", difficulty);
        self.settings.difficulty = difficulty;
        if self.settings.mode == GameMode::HumanVsAi {
            self.restart();
        }
    }

    fn accepts_human_move(&self, index: usize) -> bool {
        if self.locked || self.phase != MatchPhase::AwaitingMove {
            return false;
        }
        if !is_valid_move(&self.game_state.board, index) {
            return false;
        }
        self.settings.mode != GameMode::HumanVsAi || self.game_state.current_mark == HUMAN_MARK
    }

    fn is_ai_to_move(&self) -> bool {
        self.settings.mode == GameMode::HumanVsAi && self.game_state.current_mark == AI_MARK
    }

    /// Places the current mark. `None` if the round refused it, otherwise the round
    /// outcome if this move ended it.
    fn apply_move(&mut self, index: usize) -> Option<Option<RoundOutcome>> {
        if let Err(e) = self.game_state.place_mark(index) {
            log!("Move at {} refused: {}", index, e);
            return None;
        }

        let outcome = self.game_state.status.outcome();
        if let Some(outcome) = outcome {
            self.resolve_round(outcome);
        }
        Some(outcome)
    }

    fn resolve_round(&mut self, outcome: RoundOutcome) {
        self.locked = true;
        self.ai_turn_pending = false;
        self.outcomes.push(outcome);
        self.phase = MatchPhase::Resolved;

        log!(
            "Round {} of {} resolved: {}",
            self.round + 1,
            ROUNDS_PER_MATCH,
            outcome
        );

        if self.outcomes.len() >= ROUNDS_PER_MATCH {
            self.round = ROUNDS_PER_MATCH;
            self.phase = MatchPhase::MatchComplete;

            let tally = self.tally();
            log!(
                "Match complete: X {} / O {} / draws {}",
                tally.x_wins,
                tally.o_wins,
                tally.draws
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::games::tictactoe::board::empty_cells;

    fn controller(mode: GameMode, difficulty: Difficulty) -> MatchController {
        MatchController::new(MatchSettings::new(mode, difficulty), SessionRng::new(42))
    }

    fn play(controller: &mut MatchController, moves: &[usize]) -> MoveResult {
        let mut last = MoveResult::rejected();
        for &index in moves {
            last = controller.place_mark(index);
            assert!(last.applied, "move {} rejected", index);
        }
        last
    }

    fn assert_fresh(controller: &MatchController) {
        assert_eq!(controller.round(), 0);
        assert!(controller.outcomes().is_empty());
        assert_eq!(controller.board(), &Board::new());
        assert_eq!(controller.current_mark(), Mark::X);
        assert_eq!(controller.phase(), MatchPhase::AwaitingMove);
        assert!(!controller.is_locked());
        assert!(!controller.is_ai_turn_pending());
    }

    #[test]
    fn test_new_match_awaits_x() {
        let controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        assert_fresh(&controller);
        assert_eq!(controller.final_tally(), None);
    }

    #[test]
    fn test_human_vs_human_alternates() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        let result = controller.place_mark(4);
        assert!(result.applied);
        assert_eq!(result.outcome, None);
        assert_eq!(result.ai_move, None);
        assert_eq!(controller.current_mark(), Mark::O);
        assert!(controller.place_mark(0).applied);
        assert_eq!(controller.board().cell(0), Mark::O);
        assert_eq!(controller.current_mark(), Mark::X);
    }

    #[test]
    fn test_occupied_cell_is_a_silent_no_op() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        play(&mut controller, &[4]);
        let board = *controller.board();

        let result = controller.place_mark(4);
        assert_eq!(result, MoveResult::rejected());
        assert_eq!(controller.board(), &board);
        assert_eq!(controller.current_mark(), Mark::O);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        assert!(!controller.place_mark(9).applied);
        assert_eq!(controller.board(), &Board::new());
    }

    #[test]
    fn test_win_resolves_and_locks_round() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        let result = play(&mut controller, &[0, 3, 1, 4, 2]);

        assert_eq!(result.outcome, Some(RoundOutcome::X));
        assert!(!result.match_complete);
        assert_eq!(controller.phase(), MatchPhase::Resolved);
        assert!(controller.is_locked());
        assert_eq!(controller.outcomes(), &[RoundOutcome::X]);
        assert!(!controller.place_mark(8).applied);
    }

    #[test]
    fn test_draw_is_recorded() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        let result = play(&mut controller, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(result.outcome, Some(RoundOutcome::Draw));
        assert_eq!(controller.outcomes(), &[RoundOutcome::Draw]);
    }

    #[test]
    fn test_advance_round_resets_board() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        assert!(!controller.advance_round());

        play(&mut controller, &[0, 3, 1, 4, 2]);
        assert!(controller.advance_round());

        assert_eq!(controller.round(), 1);
        assert_eq!(controller.board(), &Board::new());
        assert_eq!(controller.current_mark(), Mark::X);
        assert_eq!(controller.phase(), MatchPhase::AwaitingMove);
        assert!(!controller.is_locked());
        assert_eq!(controller.outcomes(), &[RoundOutcome::X]);
        assert!(!controller.advance_round());
    }

    #[test]
    fn test_five_rounds_complete_the_match() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        let rounds: [&[usize]; 5] = [
            &[0, 3, 1, 4, 2],
            &[3, 0, 4, 1, 6, 2],
            &[0, 1, 2, 4, 3, 5, 7, 6, 8],
            &[4, 0, 2, 6, 8, 3],
            &[2, 0, 4, 1, 6],
        ];

        for (round_index, moves) in rounds.iter().enumerate() {
            let result = play(&mut controller, moves);
            let last_round = round_index + 1 == ROUNDS_PER_MATCH;
            assert_eq!(result.match_complete, last_round);
            if !last_round {
                assert_eq!(controller.final_tally(), None);
                assert!(controller.advance_round());
            }
        }

        assert_eq!(controller.phase(), MatchPhase::MatchComplete);
        assert_eq!(controller.round(), ROUNDS_PER_MATCH);
        assert_eq!(
            controller.final_tally(),
            Some(MatchTally { x_wins: 2, o_wins: 2, draws: 1 })
        );
        assert!(!controller.advance_round());
        assert!(!controller.place_mark(4).applied);
    }

    #[test]
    fn test_restart_from_any_phase() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        play(&mut controller, &[4, 0]);
        controller.restart();
        assert_fresh(&controller);

        play(&mut controller, &[0, 3, 1, 4, 2]);
        controller.restart();
        assert_fresh(&controller);

        for _ in 0..ROUNDS_PER_MATCH {
            play(&mut controller, &[0, 3, 1, 4, 2]);
            controller.advance_round();
        }
        assert_eq!(controller.phase(), MatchPhase::MatchComplete);
        controller.restart();
        assert_fresh(&controller);
    }

    #[test]
    fn test_ai_replies_inline_without_delay() {
        let mut controller = controller(GameMode::HumanVsAi, Difficulty::Hard);
        let result = controller.place_mark(0);

        assert!(result.applied);
        // Only the center holds against a corner opening.
        assert_eq!(result.ai_move, Some(4));
        assert_eq!(controller.board().cell(4), Mark::O);
        assert_eq!(controller.current_mark(), Mark::X);
        assert!(!controller.is_locked());
    }

    #[test]
    fn test_medium_ai_blocks_in_match() {
        let mut controller = controller(GameMode::HumanVsAi, Difficulty::Medium);
        let first = controller.place_mark(4);
        let reply = first.ai_move.unwrap();

        // Threaten along a line through the center that the AI has not touched.
        let lines = [[0, 8], [2, 6], [1, 7], [3, 5]];
        let [next, threat] = lines
            .into_iter()
            .find(|line| !line.contains(&reply))
            .unwrap();
        let second = controller.place_mark(next);
        assert_eq!(second.ai_move, Some(threat));
    }

    #[test]
    fn test_deferred_ai_turn_locks_board_until_played() {
        let settings = MatchSettings::new(GameMode::HumanVsAi, Difficulty::Hard)
            .with_ai_delay(Duration::from_millis(400));
        let mut controller = MatchController::new(settings, SessionRng::new(1));

        let result = controller.place_mark(0);
        assert!(result.applied);
        assert!(result.ai_turn_pending);
        assert_eq!(result.ai_move, None);
        assert!(controller.is_locked());
        assert!(!controller.place_mark(1).applied);

        let reply = controller.play_ai_turn();
        assert!(reply.applied);
        assert_eq!(reply.ai_move, Some(4));
        assert!(!controller.is_locked());
        assert_eq!(controller.current_mark(), Mark::X);

        assert!(!controller.play_ai_turn().applied);
    }

    #[test]
    fn test_restart_cancels_pending_ai_turn() {
        let settings = MatchSettings::new(GameMode::HumanVsAi, Difficulty::Easy)
            .with_ai_delay(Duration::from_millis(400));
        let mut controller = MatchController::new(settings, SessionRng::new(1));

        controller.place_mark(4);
        controller.restart();
        assert!(!controller.play_ai_turn().applied);
        assert_fresh(&controller);
    }

    #[test]
    fn test_play_ai_turn_ignored_in_human_vs_human() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Hard);
        controller.place_mark(0);
        assert!(!controller.play_ai_turn().applied);
        assert_eq!(controller.board().count(Mark::O), 0);
    }

    #[test]
    fn test_set_mode_restarts() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        play(&mut controller, &[4, 0]);
        controller.set_mode(GameMode::HumanVsAi);
        assert_eq!(controller.settings().mode, GameMode::HumanVsAi);
        assert_fresh(&controller);
    }

    #[test]
    fn test_set_difficulty_restarts_only_against_ai() {
        let mut controller = controller(GameMode::HumanVsHuman, Difficulty::Easy);
        play(&mut controller, &[4]);
        controller.set_difficulty(Difficulty::Hard);
        assert_eq!(controller.settings().difficulty, Difficulty::Hard);
        assert_eq!(controller.board().count(Mark::X), 1);

        controller.set_mode(GameMode::HumanVsAi);
        play(&mut controller, &[0]);
        controller.set_difficulty(Difficulty::Medium);
        assert_eq!(controller.settings().difficulty, Difficulty::Medium);
        assert_fresh(&controller);
    }

    #[test]
    fn test_hard_ai_never_loses_full_match() {
        let mut controller = controller(GameMode::HumanVsAi, Difficulty::Hard);

        while controller.phase() != MatchPhase::MatchComplete {
            if controller.phase() == MatchPhase::Resolved {
                assert!(controller.advance_round());
                continue;
            }
            let index = empty_cells(controller.board())[0];
            let result = controller.place_mark(index);
            assert!(result.applied);
            assert_ne!(result.outcome, Some(RoundOutcome::X));
        }

        let tally = controller.final_tally().unwrap();
        assert_eq!(tally.total(), ROUNDS_PER_MATCH);
        assert_eq!(tally.x_wins, 0);
        assert_eq!(controller.outcomes().len(), ROUNDS_PER_MATCH);
    }

    #[test]
    fn test_easy_match_is_reproducible_from_seed() {
        let run = |seed: u64| {
            let settings = MatchSettings::new(GameMode::HumanVsAi, Difficulty::Easy);
            let mut controller = MatchController::new(settings, SessionRng::new(seed));
            while controller.phase() != MatchPhase::MatchComplete {
                if !controller.advance_round() {
                    let index = empty_cells(controller.board())[0];
                    controller.place_mark(index);
                }
            }
            controller.outcomes().to_vec()
        };
        assert_eq!(run(5), run(5));
    }
}
