//! Move ordering for alpha-beta search.
//!
//! Ordering never adds or drops moves; it only permutes the legal list so
//! that likely refutations are tried first.

use chess::ChessMove;

use super::constants::{CAPTURE_BONUS, CHECK_BONUS, PROMOTION_BONUS};
use crate::eval::piece_value;
use crate::rules::{Game, Position};

/// Reorders legal moves before they are searched.
pub trait MoveOrderer<P: Position> {
    /// Permute `moves`. May push and pop moves on `position` but must leave
    /// it exactly as it was found.
    fn order(&self, position: &mut P, moves: Vec<P::Move>) -> Vec<P::Move>;
}

/// Captures (MVV-LVA), promotions and checks first; stable for ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOrderer;

impl HeuristicOrderer {
    /// Ordering priority of `mv`; higher is searched earlier.
    #[must_use]
    pub fn score_move(&self, game: &mut Game, mv: ChessMove) -> i32 {
        let mut score = 0;

        if let Some(victim) = game.captured_piece(mv) {
            let attacker = game
                .board()
                .piece_on(mv.get_source())
                .map_or(0, piece_value);
            score = piece_value(victim) - attacker + CAPTURE_BONUS;
        }

        if mv.get_promotion().is_some() {
            score += PROMOTION_BONUS;
        }

        if game.scoped(mv).is_check() {
            score += CHECK_BONUS;
        }

        score
    }
}

impl MoveOrderer<Game> for HeuristicOrderer {
    fn order(&self, game: &mut Game, moves: Vec<ChessMove>) -> Vec<ChessMove> {
        let mut scored: Vec<(i32, ChessMove)> = moves
            .into_iter()
            .map(|mv| (self.score_move(game, mv), mv))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }
}

/// Leaves moves in generation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unordered;

impl<P: Position> MoveOrderer<P> for Unordered {
    fn order(&self, _position: &mut P, moves: Vec<P::Move>) -> Vec<P::Move> {
        moves
    }
}

/// Exact reverse of another orderer: its best candidates are tried last.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed<O>(pub O);

impl<P: Position, O: MoveOrderer<P>> MoveOrderer<P> for Reversed<O> {
    fn order(&self, position: &mut P, moves: Vec<P::Move>) -> Vec<P::Move> {
        let mut moves = self.0.order(position, moves);
        moves.reverse();
        moves
    }
}
