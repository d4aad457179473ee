//! Move selector configuration and difficulty presets.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::search::{Score, MATE_THRESHOLD};

/// Default maximum iterative-deepening depth.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Default thinking time per move.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(1500);

/// Configuration for one [`MoveSelector`](super::MoveSelector).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorConfig {
    /// Deepest iteration attempted, in plies.
    pub max_depth: u32,
    /// Wall-clock budget for one move request.
    pub time_budget: Duration,
    /// Consult the opening book before searching.
    pub use_book: bool,
    /// Root score above which deepening stops early.
    pub mate_threshold: Score,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: DEFAULT_TIME_BUDGET,
            use_book: true,
            mate_threshold: MATE_THRESHOLD,
        }
    }
}

impl SelectorConfig {
    #[must_use]
    pub fn new(max_depth: u32, time_budget: Duration) -> Self {
        SelectorConfig {
            max_depth,
            time_budget,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_book(self) -> Self {
        SelectorConfig {
            use_book: false,
            ..self
        }
    }
}

/// Strength presets for front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn max_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn time_budget(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(500),
            Difficulty::Medium => Duration::from_millis(1000),
            Difficulty::Hard => DEFAULT_TIME_BUDGET,
        }
    }

    #[must_use]
    pub fn config(self) -> SelectorConfig {
        SelectorConfig::new(self.max_depth(), self.time_budget())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Error returned when a difficulty name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty '{}' (expected easy, medium or hard)", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}
