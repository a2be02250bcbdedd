use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{Difficulty, GameMode};
use super::Validate;

const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    #[serde(default = "default_ai_delay_ms")]
    pub ai_delay_ms: u64,
    #[serde(default = "default_round_pause_ms")]
    pub round_pause_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_ai_delay_ms() -> u64 {
    400
}

fn default_round_pause_ms() -> u64 {
    1500
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::Easy,
            ai_delay_ms: default_ai_delay_ms(),
            round_pause_ms: default_round_pause_ms(),
            seed: None,
        }
    }
}

impl Validate for MatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ai_delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "AI delay must be at most {} ms, got {}",
                MAX_DELAY_MS, self.ai_delay_ms
            ));
        }
        if self.round_pause_ms > MAX_DELAY_MS {
            return Err(format!(
                "Round pause must be at most {} ms, got {}",
                MAX_DELAY_MS, self.round_pause_ms
            ));
        }
        Ok(())
    }
}
