//! The rules seam between the bot and a chess rules implementation.
//!
//! Search, ordering and move selection only ever talk to a position through
//! the [`Position`] trait. [`Game`] is the real implementation backed by the
//! `chess` crate; tests plug hand-built game trees into the same seam.

mod error;
mod game;
mod key;
mod san;

use std::fmt;
use std::ops::{Deref, DerefMut};

use chess::{Color, Square, ALL_SQUARES};

pub use error::RulesError;
pub use game::Game;
pub use key::PositionKey;

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of the same position after which the game is drawn.
pub const FIVEFOLD_REPETITION: usize = 5;

/// Why a game ended in a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::SeventyFiveMoves => "seventy-five-move rule",
            DrawReason::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(text)
    }
}

/// Game state of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    /// The side to move has been mated.
    Checkmate,
    Draw(DrawReason),
}

impl Status {
    #[must_use]
    pub fn is_game_over(self) -> bool {
        !matches!(self, Status::Ongoing)
    }
}

/// A mutable chess position with push/pop move history.
///
/// Moves handed to [`Position::push`] must come from
/// [`Position::legal_moves`] of the same position; implementations are free
/// to assert on anything else.
pub trait Position {
    type Move: Copy + Eq + fmt::Debug;

    fn legal_moves(&self) -> Vec<Self::Move>;

    fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    fn push(&mut self, mv: Self::Move);

    /// Undo the most recent [`Position::push`], returning the move taken back.
    fn pop(&mut self) -> Option<Self::Move>;

    fn side_to_move(&self) -> Color;

    fn is_check(&self) -> bool;

    fn is_capture(&self, mv: Self::Move) -> bool;

    /// A draw that applies even though the side to move still has legal moves.
    fn automatic_draw(&self) -> Option<DrawReason> {
        None
    }

    fn is_insufficient_material(&self) -> bool {
        self.automatic_draw() == Some(DrawReason::InsufficientMaterial)
    }

    fn status(&self) -> Status {
        if self.legal_move_count() == 0 {
            return if self.is_check() {
                Status::Checkmate
            } else {
                Status::Draw(DrawReason::Stalemate)
            };
        }
        self.automatic_draw().map_or(Status::Ongoing, Status::Draw)
    }

    fn is_checkmate(&self) -> bool {
        self.status() == Status::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.status() == Status::Draw(DrawReason::Stalemate)
    }

    fn is_game_over(&self) -> bool {
        self.status().is_game_over()
    }

    /// Push `mv` for the lifetime of the returned guard.
    fn scoped(&mut self, mv: Self::Move) -> Scoped<'_, Self>
    where
        Self: Sized,
    {
        Scoped::new(self, mv)
    }
}

/// A pushed move that is popped again when the guard is dropped.
///
/// Dereferences to the position with the move applied.
pub struct Scoped<'a, P: Position> {
    position: &'a mut P,
}

impl<'a, P: Position> Scoped<'a, P> {
    fn new(position: &'a mut P, mv: P::Move) -> Self {
        position.push(mv);
        Scoped { position }
    }
}

impl<P: Position> Deref for Scoped<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for Scoped<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for Scoped<'_, P> {
    fn drop(&mut self) {
        let undone = self.position.pop();
        debug_assert!(undone.is_some(), "scoped move was already popped");
    }
}

/// Reflect a square across the horizontal centre line (a1 <-> a8).
#[inline]
#[must_use]
pub fn mirror(square: Square) -> Square {
    ALL_SQUARES[square.to_index() ^ 56]
}
