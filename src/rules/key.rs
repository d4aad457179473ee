use std::fmt;

use chess::{Board, Color, File, Piece, Rank, Square};

/// Canonical piece-placement key of a position.
///
/// This is the first field of a FEN record; side to move, castling rights,
/// en-passant square and move counters are deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(String);

impl PositionKey {
    /// Build the key from the pieces on `board`.
    #[must_use]
    pub fn of(board: &Board) -> Self {
        let mut placement = String::with_capacity(64 + 7);
        for rank in (0..8).rev() {
            let mut empty = 0u8;
            for file in 0..8 {
                let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
                match (board.piece_on(square), board.color_on(square)) {
                    (Some(piece), Some(color)) => {
                        if empty > 0 {
                            placement.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        placement.push(piece_char(piece, color));
                    }
                    _ => empty += 1,
                }
            }
            if empty > 0 {
                placement.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                placement.push('/');
            }
        }
        PositionKey(placement)
    }

    /// Wrap an already formatted placement field, e.g. from a FEN record.
    ///
    /// Anything after the first whitespace is ignored.
    #[must_use]
    pub fn from_placement(placement: &str) -> Self {
        let field = placement.split_whitespace().next().unwrap_or_default();
        PositionKey(field.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    if color == Color::White {
        c.to_ascii_uppercase()
    } else {
        c
    }
}
