//! Standard algebraic notation output.

use chess::{Board, ChessMove, MoveGen, Piece, Square, EMPTY};

fn piece_letter(piece: Piece) -> Option<char> {
    match piece {
        Piece::Pawn => None,
        Piece::Knight => Some('N'),
        Piece::Bishop => Some('B'),
        Piece::Rook => Some('R'),
        Piece::Queen => Some('Q'),
        Piece::King => Some('K'),
    }
}

fn file_char(square: Square) -> char {
    char::from(b'a' + square.get_file().to_index() as u8)
}

fn rank_char(square: Square) -> char {
    char::from(b'1' + square.get_rank().to_index() as u8)
}

/// Render a legal move of `board` in SAN, e.g. "Nbd2", "exd6", "e8=Q+", "O-O".
pub(crate) fn to_san(board: &Board, mv: ChessMove) -> String {
    let from = mv.get_source();
    let to = mv.get_dest();
    let Some(piece) = board.piece_on(from) else {
        return mv.to_string();
    };

    let mut san = String::with_capacity(8);
    let file_delta = to.get_file().to_index().abs_diff(from.get_file().to_index());
    if piece == Piece::King && file_delta == 2 {
        san.push_str(if to.get_file().to_index() > from.get_file().to_index() {
            "O-O"
        } else {
            "O-O-O"
        });
    } else {
        let is_capture = board.piece_on(to).is_some() || (piece == Piece::Pawn && file_delta == 1);
        match piece_letter(piece) {
            Some(letter) => {
                san.push(letter);
                let rivals: Vec<Square> = MoveGen::new_legal(board)
                    .filter(|m| {
                        m.get_dest() == to
                            && m.get_source() != from
                            && board.piece_on(m.get_source()) == Some(piece)
                    })
                    .map(|m| m.get_source())
                    .collect();
                if !rivals.is_empty() {
                    let same_file = rivals.iter().any(|s| s.get_file() == from.get_file());
                    let same_rank = rivals.iter().any(|s| s.get_rank() == from.get_rank());
                    if !same_file {
                        san.push(file_char(from));
                    } else if !same_rank {
                        san.push(rank_char(from));
                    } else {
                        san.push(file_char(from));
                        san.push(rank_char(from));
                    }
                }
            }
            None if is_capture => san.push(file_char(from)),
            None => {}
        }
        if is_capture {
            san.push('x');
        }
        san.push_str(&to.to_string());
        if let Some(promoted) = mv.get_promotion().and_then(piece_letter) {
            san.push('=');
            san.push(promoted);
        }
    }

    let after = board.make_move_new(mv);
    if *after.checkers() != EMPTY {
        san.push(if MoveGen::new_legal(&after).len() == 0 { '#' } else { '+' });
    }
    san
}

#[cfg(test)]
mod tests {
    use crate::rules::Game;

    fn san(fen: &str, uci: &str) -> String {
        let game = Game::from_fen(fen).expect("valid fen");
        let mv = game.parse_uci_move(uci).expect("legal move");
        game.san(mv)
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn pawn_and_piece_moves() {
        assert_eq!(san(START, "e2e4"), "e4");
        assert_eq!(san(START, "g1f3"), "Nf3");
    }

    #[test]
    fn captures_and_mate() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        assert_eq!(san(fen, "h5f7"), "Qxf7#");
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
        assert_eq!(san(fen, "e4d5"), "exd5");
    }

    #[test]
    fn castling_and_disambiguation() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(san(fen, "e1g1"), "O-O");
        assert_eq!(san(fen, "e1c1"), "O-O-O");
        let fen = "4k3/8/8/8/8/8/8/RN2K1NR w - - 0 1";
        assert_eq!(san(fen, "b1d2"), "Nd2");
        let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1";
        assert_eq!(san(fen, "b1d2"), "Nbd2");
    }

    #[test]
    fn promotion_with_check() {
        let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(san(fen, "a7a8q"), "a8=Q+");
    }
}
