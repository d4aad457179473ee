//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The search is generic over the [`Position`] it walks, the [`Evaluator`]
//! scoring its leaves and the [`MoveOrderer`] sorting each node's moves.
//! Every move applied during the search goes through a [`Scoped`] guard, so
//! the position is back in its original state whenever a call returns,
//! including after a cutoff.
//!
//! [`Scoped`]: crate::rules::Scoped

mod constants;
mod move_order;

#[cfg(test)]
mod tests;

use chess::Color;

use crate::eval::Evaluator;
use crate::rules::Position;

pub use constants::{
    Score, CAPTURE_BONUS, CHECK_BONUS, DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD, PROMOTION_BONUS,
};
pub use move_order::{HeuristicOrderer, MoveOrderer, Reversed, Unordered};

/// Counters collected while searching. Instrumentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, leaves included.
    pub nodes: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        self.nodes = 0;
    }
}

/// One alpha-beta search over a position.
///
/// Leaf evaluations are White-relative; they are flipped when the search
/// runs on behalf of Black so that the root side always maximizes.
pub struct AlphaBeta<'a, E, O> {
    evaluator: &'a E,
    orderer: &'a O,
    stats: &'a mut SearchStats,
    perspective: Score,
}

impl<'a, E, O> AlphaBeta<'a, E, O> {
    /// A search maximizing for White, counting nodes into `stats`.
    pub fn new(evaluator: &'a E, orderer: &'a O, stats: &'a mut SearchStats) -> Self {
        AlphaBeta {
            evaluator,
            orderer,
            stats,
            perspective: 1.0,
        }
    }

    /// Score leaves from `side`'s point of view instead of White's.
    #[must_use]
    pub fn for_side(mut self, side: Color) -> Self {
        self.perspective = match side {
            Color::White => 1.0,
            Color::Black => -1.0,
        };
        self
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &*self.stats
    }

    /// Minimax value of `position` searched `depth` plies deep inside the
    /// `(alpha, beta)` window.
    ///
    /// `maximizing` tells whether the side to move in `position` is the side
    /// the search runs for. Mates score `±MATE_SCORE`, every other finished
    /// game scores [`DRAW_SCORE`].
    pub fn search<P>(
        &mut self,
        position: &mut P,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score
    where
        P: Position,
        E: Evaluator<P>,
        O: MoveOrderer<P>,
    {
        self.stats.nodes += 1;

        if depth == 0 {
            return self.perspective * self.evaluator.evaluate(position);
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            if !position.is_check() {
                return DRAW_SCORE;
            }
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }
        if position.automatic_draw().is_some() {
            return DRAW_SCORE;
        }

        let moves = self.orderer.order(position, moves);

        if maximizing {
            let mut best = Score::NEG_INFINITY;
            for mv in moves {
                let value = {
                    let mut child = position.scoped(mv);
                    self.search(&mut *child, depth - 1, alpha, beta, false)
                };
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = Score::INFINITY;
            for mv in moves {
                let value = {
                    let mut child = position.scoped(mv);
                    self.search(&mut *child, depth - 1, alpha, beta, true)
                };
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Search `position` from the side to move with a full window.
///
/// Convenience wrapper returning the score together with the node count.
pub fn search<P, E, O>(position: &mut P, depth: u32, evaluator: &E, orderer: &O) -> (Score, SearchStats)
where
    P: Position,
    E: Evaluator<P>,
    O: MoveOrderer<P>,
{
    let mut stats = SearchStats::default();
    let side = position.side_to_move();
    let score = AlphaBeta::new(evaluator, orderer, &mut stats)
        .for_side(side)
        .search(position, depth, Score::NEG_INFINITY, Score::INFINITY, true);
    (score, stats)
}
