//! Move selection: iterative deepening over the search under a time budget.
//!
//! [`select_move`] is the one-shot entry point; [`MoveSelector`] exposes the
//! full [`Selection`] report and lets callers swap the evaluator, orderer,
//! opening book or clock.

mod config;
mod selector;
pub mod time;

pub use config::{
    Difficulty, SelectorConfig, UnknownDifficulty, DEFAULT_MAX_DEPTH, DEFAULT_TIME_BUDGET,
};
pub use selector::{select_move, MoveSelector, Selection, Termination};
pub use time::{Clock, SteppingClock, SystemClock};
