//! Material values and piece-square tables.
//!
//! Tables are indexed by square number with a1 = 0 and h8 = 63, so the first
//! row below is rank 1 from White's side. Black pieces look up the vertically
//! mirrored square.

use chess::{Color, Piece, Square};

use crate::rules::mirror;

/// Material value in centipawns. The king value only serves as a sentinel
/// in capture ordering; the evaluator skips kings when summing material.
#[inline]
#[must_use]
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 20000,
    }
}

#[rustfmt::skip]
pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

/// Files c through f.
const ROOK_CENTER_FILES: std::ops::RangeInclusive<usize> = 2..=5;
const ROOK_CENTER_BONUS: i32 = 10;

/// Positional bonus of `piece` of `color` standing on `square`.
#[must_use]
pub fn positional_bonus(piece: Piece, color: Color, square: Square) -> i32 {
    let square = match color {
        Color::White => square,
        Color::Black => mirror(square),
    };
    match piece {
        Piece::Pawn => PAWN_TABLE[square.to_index()],
        Piece::Knight => KNIGHT_TABLE[square.to_index()],
        Piece::Bishop => BISHOP_TABLE[square.to_index()],
        Piece::Rook => {
            if ROOK_CENTER_FILES.contains(&square.get_file().to_index()) {
                ROOK_CENTER_BONUS
            } else {
                0
            }
        }
        Piece::Queen => queen_centralization(square),
        Piece::King => 0,
    }
}

/// `(8 - d) * 5` truncated, where d is the file plus rank distance from the
/// board centre (3.5, 3.5).
#[allow(clippy::cast_possible_truncation)]
fn queen_centralization(square: Square) -> i32 {
    let file = square.get_file().to_index() as f64;
    let rank = square.get_rank().to_index() as f64;
    let distance = (3.5 - file).abs() + (3.5 - rank).abs();
    ((8.0 - distance) * 5.0) as i32
}
