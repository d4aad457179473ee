//! Passed pawn scoring.

use chess::{Board, Color, File, Piece, Rank, Square};

const PASSED_PAWN_RANK_BONUS: i32 = 10;

fn is_pawn(board: &Board, square: Square, color: Color) -> bool {
    board.piece_on(square) == Some(Piece::Pawn) && board.color_on(square) == Some(color)
}

/// Whether an enemy pawn stands on `file` or an adjacent file on any rank
/// in `ranks`.
fn blocked(board: &Board, file: usize, ranks: std::ops::Range<usize>, enemy: Color) -> bool {
    let files = file.saturating_sub(1)..=(file + 1).min(7);
    files.into_iter().any(|f| {
        ranks.clone().any(|r| {
            is_pawn(
                board,
                Square::make_square(Rank::from_index(r), File::from_index(f)),
                enemy,
            )
        })
    })
}

/// Passed pawn term in centipawns from White's point of view.
///
/// A White pawn with no Black pawn ahead of it on its own or an adjacent file
/// earns `rank * 10` (rank counted from 0); Black is mirrored.
#[must_use]
pub fn passed_pawns(board: &Board) -> i32 {
    let pawns = *board.pieces(Piece::Pawn);
    let mut score = 0;

    for square in pawns & *board.color_combined(Color::White) {
        let file = square.get_file().to_index();
        let rank = square.get_rank().to_index();
        if !blocked(board, file, rank + 1..8, Color::Black) {
            score += rank as i32 * PASSED_PAWN_RANK_BONUS;
        }
    }

    for square in pawns & *board.color_combined(Color::Black) {
        let file = square.get_file().to_index();
        let rank = square.get_rank().to_index();
        if !blocked(board, file, 0..rank, Color::White) {
            score -= (7 - rank as i32) * PASSED_PAWN_RANK_BONUS;
        }
    }

    score
}
