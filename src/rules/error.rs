//! Error types for position setup and move parsing.

use std::fmt;

/// Error type for building a [`Game`](super::Game) or parsing moves against it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// FEN string rejected by the rules library or with bad move counters
    InvalidFen { fen: String, reason: String },
    /// Move string is not well-formed coordinate notation
    InvalidMove { notation: String },
    /// Move is well-formed but not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidFen { fen, reason } => {
                write!(f, "Invalid FEN '{fen}': {reason}")
            }
            RulesError::InvalidMove { notation } => {
                write!(f, "Invalid move notation '{notation}'")
            }
            RulesError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for RulesError {}
