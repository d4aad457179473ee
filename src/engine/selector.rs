//! Iterative-deepening move selection under a time budget.
//!
//! The driver is an explicit state machine. Each root move is searched with
//! a fresh full window at every depth; the best move of the deepest completed
//! depth wins. The clock is polled before every depth and every root move, so
//! the budget can be overrun by at most one root-move search.

use std::fmt;
use std::time::Duration;

use chess::ChessMove;

use super::config::SelectorConfig;
use super::time::{Clock, SystemClock};
use crate::book::OpeningBook;
use crate::eval::{Evaluator, HeuristicEvaluator};
use crate::rules::{Game, Position};
use crate::search::{AlphaBeta, HeuristicOrderer, MoveOrderer, Score, SearchStats};

/// Why [`MoveSelector::select`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The game is already over; no move was chosen.
    NoLegalMoves,
    /// Only one move was legal, returned without searching.
    SingleLegalMove,
    /// The opening book supplied the move.
    OpeningBook,
    /// Every depth up to the configured maximum completed.
    MaxDepth,
    /// The budget ran out before or during a depth.
    TimeExceeded,
    /// A completed depth scored above the mate threshold.
    MateFound,
    /// More than half the budget was spent after a completed depth.
    HalfBudgetSpent,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::NoLegalMoves => "no legal moves",
            Termination::SingleLegalMove => "single legal move",
            Termination::OpeningBook => "opening book",
            Termination::MaxDepth => "max depth",
            Termination::TimeExceeded => "time exceeded",
            Termination::MateFound => "mate found",
            Termination::HalfBudgetSpent => "half budget spent",
        };
        f.write_str(text)
    }
}

/// Outcome of one move request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub best_move: Option<ChessMove>,
    /// Root score of `best_move` from the mover's point of view, if it came
    /// from a completed depth.
    pub score: Option<Score>,
    /// Deepest fully searched depth; 0 when no depth completed.
    pub depth: u32,
    /// Search nodes visited across all depths.
    pub nodes: u64,
    pub elapsed: Duration,
    pub termination: Termination,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// About to start `depth`.
    Deepen { depth: u32 },
    /// Searching root move `index` at `depth`.
    EvaluateRoot { depth: u32, index: usize },
    TimeExceeded,
    MateFound,
    Done(Termination),
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    mv: ChessMove,
    score: Score,
}

/// Picks a move for the side to move in a [`Game`].
#[derive(Debug, Clone)]
pub struct MoveSelector<E = HeuristicEvaluator, O = HeuristicOrderer, C = SystemClock> {
    config: SelectorConfig,
    evaluator: E,
    orderer: O,
    clock: C,
    book: &'static OpeningBook,
}

impl MoveSelector {
    /// Selector with the built-in evaluator, orderer, book and wall clock.
    #[must_use]
    pub fn new(config: SelectorConfig) -> Self {
        MoveSelector {
            config,
            evaluator: HeuristicEvaluator,
            orderer: HeuristicOrderer,
            clock: SystemClock::default(),
            book: OpeningBook::standard(),
        }
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

impl<E, O, C> MoveSelector<E, O, C>
where
    E: Evaluator<Game>,
    O: MoveOrderer<Game>,
    C: Clock,
{
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> MoveSelector<E, O, C2> {
        MoveSelector {
            config: self.config,
            evaluator: self.evaluator,
            orderer: self.orderer,
            clock,
            book: self.book,
        }
    }

    #[must_use]
    pub fn with_orderer<O2: MoveOrderer<Game>>(self, orderer: O2) -> MoveSelector<E, O2, C> {
        MoveSelector {
            config: self.config,
            evaluator: self.evaluator,
            orderer,
            clock: self.clock,
            book: self.book,
        }
    }

    #[must_use]
    pub fn with_evaluator<E2: Evaluator<Game>>(self, evaluator: E2) -> MoveSelector<E2, O, C> {
        MoveSelector {
            config: self.config,
            evaluator,
            orderer: self.orderer,
            clock: self.clock,
            book: self.book,
        }
    }

    #[must_use]
    pub fn with_book(mut self, book: &'static OpeningBook) -> Self {
        self.book = book;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SelectorConfig {
        &mut self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn out_of_time(&self) -> bool {
        self.clock.elapsed() > self.config.time_budget
    }

    fn finish(&self, best_move: Option<ChessMove>, termination: Termination) -> Selection {
        Selection {
            best_move,
            score: None,
            depth: 0,
            nodes: 0,
            elapsed: self.clock.elapsed(),
            termination,
        }
    }

    /// Choose a move for the side to move in `game`.
    ///
    /// `game` is only mutated through scoped pushes and is back in its
    /// original state on return. Returns no move only when the side to move
    /// has no legal moves.
    pub fn select(&mut self, game: &mut Game) -> Selection {
        self.clock.start();

        let moves = game.legal_moves();
        match moves.len() {
            0 => return self.finish(None, Termination::NoLegalMoves),
            1 => return self.finish(Some(moves[0]), Termination::SingleLegalMove),
            _ => {}
        }

        if self.config.use_book {
            if let Some(mv) = self.book.lookup(game) {
                log::info!("book move {}", game.san(mv));
                return self.finish(Some(mv), Termination::OpeningBook);
            }
        }

        let root = self.orderer.order(game, moves);
        let side = game.side_to_move();

        let mut stats = SearchStats::default();
        let mut nodes = 0;
        let mut best: Option<Candidate> = None;
        let mut completed = 0;
        let mut current: Option<Candidate> = None;

        let mut phase = Phase::Deepen { depth: 1 };
        let termination = loop {
            phase = match phase {
                Phase::Deepen { depth } => {
                    if depth > self.config.max_depth {
                        Phase::Done(Termination::MaxDepth)
                    } else if self.out_of_time() {
                        Phase::TimeExceeded
                    } else {
                        nodes += stats.nodes;
                        stats.reset();
                        current = None;
                        Phase::EvaluateRoot { depth, index: 0 }
                    }
                }
                Phase::EvaluateRoot { depth, index } if index == root.len() => {
                    best = current;
                    completed = depth;
                    let score = current.map_or(Score::NEG_INFINITY, |c| c.score);
                    let elapsed = self.clock.elapsed();
                    log::debug!(
                        "depth {depth} best {} score {score:.2} nodes {} time {elapsed:?}",
                        current.map_or_else(|| "none".to_string(), |c| c.mv.to_string()),
                        stats.nodes,
                    );
                    if score > self.config.mate_threshold {
                        Phase::MateFound
                    } else if elapsed > self.config.time_budget / 2 {
                        Phase::Done(Termination::HalfBudgetSpent)
                    } else {
                        Phase::Deepen { depth: depth + 1 }
                    }
                }
                Phase::EvaluateRoot { depth, index } => {
                    if self.out_of_time() {
                        Phase::TimeExceeded
                    } else {
                        let mv = root[index];
                        let score = {
                            let mut child = game.scoped(mv);
                            AlphaBeta::new(&self.evaluator, &self.orderer, &mut stats)
                                .for_side(side)
                                .search(
                                    &mut *child,
                                    depth - 1,
                                    Score::NEG_INFINITY,
                                    Score::INFINITY,
                                    false,
                                )
                        };
                        if current.map_or(true, |c| score > c.score) {
                            current = Some(Candidate { mv, score });
                        }
                        Phase::EvaluateRoot {
                            depth,
                            index: index + 1,
                        }
                    }
                }
                Phase::TimeExceeded => Phase::Done(Termination::TimeExceeded),
                Phase::MateFound => Phase::Done(Termination::MateFound),
                Phase::Done(termination) => break termination,
            };
        };
        nodes += stats.nodes;

        let best_move = best.map_or(root[0], |c| c.mv);
        let selection = Selection {
            best_move: Some(best_move),
            score: best.map(|c| c.score),
            depth: completed,
            nodes,
            elapsed: self.clock.elapsed(),
            termination,
        };
        log::info!(
            "selected {} depth {} nodes {} ({termination})",
            game.san(best_move),
            completed,
            nodes,
        );
        selection
    }
}

/// Choose a move for the side to move in `game` with the default bot.
///
/// Returns `None` only when there is no legal move.
pub fn select_move(game: &mut Game, max_depth: u32, time_budget: Duration) -> Option<ChessMove> {
    MoveSelector::new(SelectorConfig::new(max_depth, time_budget))
        .select(game)
        .best_move
}
