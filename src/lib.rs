//! A small chess bot: heuristic evaluation, move ordering, alpha-beta
//! minimax, a two-entry opening book and time-boxed iterative deepening.
//!
//! Chess rules come from the `chess` crate through the [`rules::Position`]
//! seam. The usual entry point is [`select_move`]:
//!
//! ```
//! use std::time::Duration;
//! use chess_bot::{select_move, Game};
//!
//! let mut game = Game::new();
//! let mv = select_move(&mut game, 3, Duration::from_millis(200));
//! assert_eq!(mv.map(|m| m.to_string()), Some("e2e4".to_string()));
//! ```

pub mod book;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod uci;

pub use book::OpeningBook;
pub use engine::{select_move, Difficulty, MoveSelector, SelectorConfig, Selection, Termination};
pub use eval::{evaluate, EvalBreakdown, Evaluator, HeuristicEvaluator};
pub use rules::{Game, Position, PositionKey, RulesError};
pub use search::{search, AlphaBeta, HeuristicOrderer, MoveOrderer, Score, SearchStats};
