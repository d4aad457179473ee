//! Static board evaluation.
//!
//! Scores are from White's point of view in pawn units: the centipawn sum of
//! the terms below is divided by 100. Checkmates short-circuit to
//! `±MATE_SCORE` without scaling.
//!
//! Terms:
//! - Material plus piece-square bonuses
//! - Mobility of the side to move
//! - Passed pawns

mod pawns;
mod tables;

#[cfg(test)]
pub(crate) mod tests;

use chess::{Color, Piece, ALL_SQUARES};

use crate::rules::{Game, Position};
use crate::search::{Score, DRAW_SCORE, MATE_SCORE};

pub use pawns::passed_pawns;
pub use tables::{piece_value, positional_bonus, BISHOP_TABLE, KNIGHT_TABLE, PAWN_TABLE};

/// Centipawns per legal move of the side to move.
pub const MOBILITY_WEIGHT: i32 = 5;

/// Centipawns per pawn unit of [`Score`].
pub const CENTIPAWNS: Score = 100.0;

/// Static evaluation of a position.
pub trait Evaluator<P> {
    /// Score of `position`, positive when White is better.
    fn evaluate(&self, position: &P) -> Score;
}

/// Individual terms of a non-terminal evaluation, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalBreakdown {
    /// Material and piece-square bonuses.
    pub material: i32,
    /// Signed by the side to move, not a White-minus-Black differential.
    pub mobility: i32,
    pub pawn_structure: i32,
}

impl EvalBreakdown {
    #[must_use]
    pub fn centipawns(&self) -> i32 {
        self.material + self.mobility + self.pawn_structure
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score::from(self.centipawns()) / CENTIPAWNS
    }
}

/// The bot's hand-written evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    /// Term-by-term evaluation, or `None` for mated, stalemated and dead
    /// positions.
    #[must_use]
    pub fn breakdown(&self, game: &Game) -> Option<EvalBreakdown> {
        let mobility = game.legal_move_count();
        if mobility == 0 || game.is_insufficient_material() {
            return None;
        }
        Some(Self::terms(game, mobility))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn terms(game: &Game, mobility: usize) -> EvalBreakdown {
        let board = game.board();

        let mut material = 0;
        for &square in &ALL_SQUARES {
            let Some((color, piece)) = game.piece_at(square) else {
                continue;
            };
            if piece == Piece::King {
                continue;
            }
            let value = piece_value(piece) + positional_bonus(piece, color, square);
            match color {
                Color::White => material += value,
                Color::Black => material -= value,
            }
        }

        let mobility = MOBILITY_WEIGHT * mobility as i32;
        let mobility = match game.side_to_move() {
            Color::White => mobility,
            Color::Black => -mobility,
        };

        EvalBreakdown {
            material,
            mobility,
            pawn_structure: passed_pawns(board),
        }
    }
}

impl Evaluator<Game> for HeuristicEvaluator {
    fn evaluate(&self, game: &Game) -> Score {
        let mobility = game.legal_move_count();
        if mobility == 0 {
            if !game.is_check() {
                return DRAW_SCORE;
            }
            return match game.side_to_move() {
                Color::White => -MATE_SCORE,
                Color::Black => MATE_SCORE,
            };
        }
        if game.is_insufficient_material() {
            return DRAW_SCORE;
        }
        Self::terms(game, mobility).score()
    }
}

/// Evaluate `game` with the default [`HeuristicEvaluator`].
#[must_use]
pub fn evaluate(game: &Game) -> Score {
    HeuristicEvaluator.evaluate(game)
}
