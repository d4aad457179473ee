//! Search score constants.

/// Search and evaluation score, in pawn units.
pub type Score = f64;

/// Score of a checkmate, from the winner's point of view.
pub const MATE_SCORE: Score = 100_000.0;

/// Score of any drawn position.
pub const DRAW_SCORE: Score = 0.0;

/// Root scores above this are treated as a forced mate and end deepening.
pub const MATE_THRESHOLD: Score = 5000.0;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================

/// Added to every capture on top of victim minus attacker value
pub const CAPTURE_BONUS: i32 = 1000;

/// Added to every promotion, capturing or not
pub const PROMOTION_BONUS: i32 = 900;

/// Added to moves that give check
pub const CHECK_BONUS: i32 = 50;
