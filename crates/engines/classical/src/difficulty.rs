//! Difficulty tiers and the search settings behind them.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use checkers_core::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                depth: 2,
                move_time: Duration::from_millis(250),
                blunder_rate: 0.25,
                move_ordering: false,
                transposition_table: false,
                positional_eval: false,
            },
            Difficulty::Medium => DifficultyProfile {
                depth: 4,
                move_time: Duration::from_millis(500),
                blunder_rate: 0.08,
                move_ordering: true,
                transposition_table: false,
                positional_eval: true,
            },
            Difficulty::Hard => DifficultyProfile {
                depth: 7,
                move_time: Duration::from_millis(1500),
                blunder_rate: 0.0,
                move_ordering: true,
                transposition_table: true,
                positional_eval: true,
            },
            Difficulty::Expert => DifficultyProfile {
                depth: 12,
                move_time: Duration::from_secs(4),
                blunder_rate: 0.0,
                move_ordering: true,
                transposition_table: true,
                positional_eval: true,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// What a tier is allowed to do while thinking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Deepest iteration of iterative deepening.
    pub depth: u8,
    /// Wall-clock budget per move.
    pub move_time: Duration,
    /// Probability of playing a random legal move instead of the best one.
    pub blunder_rate: f64,
    pub move_ordering: bool,
    pub transposition_table: bool,
    /// When false only material is counted.
    pub positional_eval: bool,
}
