use std::time::Duration;

use crate::config::MatchConfig;
use super::types::{Difficulty, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Zero makes the AI answer inside the same `place_mark` call.
    pub ai_delay: Duration,
}

impl MatchSettings {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            ai_delay: Duration::ZERO,
        }
    }

    pub fn with_ai_delay(mut self, ai_delay: Duration) -> Self {
        self.ai_delay = ai_delay;
        self
    }
}

impl From<&MatchConfig> for MatchSettings {
    fn from(config: &MatchConfig) -> Self {
        Self {
            mode: config.mode,
            difficulty: config.difficulty,
            ai_delay: Duration::from_millis(config.ai_delay_ms),
        }
    }
}
