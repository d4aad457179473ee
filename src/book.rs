//! Opening book.
//!
//! A flat table from piece placement to an ordered list of preferred moves.
//! The standard book is built once per process and shared read-only.

use std::collections::HashMap;

use chess::{ChessMove, Square};
use once_cell::sync::Lazy;

use crate::rules::{Game, PositionKey};

/// Placement of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Placement after 1.e4.
pub const KING_PAWN_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR";

static STANDARD: Lazy<OpeningBook> = Lazy::new(|| {
    OpeningBook::from_entries([
        (
            PositionKey::from_placement(START_PLACEMENT),
            vec![
                ChessMove::new(Square::E2, Square::E4, None),
                ChessMove::new(Square::D2, Square::D4, None),
                ChessMove::new(Square::G1, Square::F3, None),
            ],
        ),
        (
            PositionKey::from_placement(KING_PAWN_PLACEMENT),
            vec![
                ChessMove::new(Square::E7, Square::E5, None),
                ChessMove::new(Square::C7, Square::C5, None),
                ChessMove::new(Square::E7, Square::E6, None),
            ],
        ),
    ])
});

/// Immutable lookup table from placement to candidate moves.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<PositionKey, Vec<ChessMove>>,
}

impl OpeningBook {
    /// The built-in book: replies to the start position and to 1.e4.
    #[must_use]
    pub fn standard() -> &'static OpeningBook {
        &STANDARD
    }

    /// Build a book from `(placement, candidates)` pairs. Later entries for
    /// the same placement replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PositionKey, Vec<ChessMove>)>,
    {
        OpeningBook {
            entries: entries.into_iter().collect(),
        }
    }

    /// Candidates stored for `key`, in preference order.
    #[must_use]
    pub fn candidates(&self, key: &PositionKey) -> &[ChessMove] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// First stored candidate that is legal in `game`.
    ///
    /// Candidates are checked against the current legal moves rather than
    /// trusted, since the key ignores side to move and castling rights.
    #[must_use]
    pub fn lookup(&self, game: &Game) -> Option<ChessMove> {
        let key = game.key();
        let mv = self
            .candidates(&key)
            .iter()
            .copied()
            .find(|&mv| game.is_legal(mv))?;
        log::debug!("book hit {key}: {mv}");
        Some(mv)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
