//! [`Position`] implementation on top of the `chess` crate.
//!
//! `chess::Board` is an immutable value type; `Game` layers the move stack,
//! the half-move clock and the repetition history on top of it.

use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, ChessMove, Color, MoveGen, Piece, Square, EMPTY};

use super::{
    san, DrawReason, Position, PositionKey, RulesError, FIVEFOLD_REPETITION,
    SEVENTY_FIVE_MOVE_PLIES,
};

/// Squares of the light colour (b1, a2, ...).
const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

/// State needed to take back one move.
#[derive(Clone, Copy, Debug)]
struct Undo {
    board: Board,
    mv: ChessMove,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// A chess game: the current board plus everything needed to undo moves and
/// detect draws by rule.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    undo: Vec<Undo>,
    /// Hash of every position reached, the current one last.
    hashes: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::default(), 0, 1)
    }

    fn from_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Game {
            board,
            halfmove_clock,
            fullmove_number,
            undo: Vec::new(),
            hashes: vec![board.get_hash()],
        }
    }

    /// Set up a position from a FEN record.
    ///
    /// The move counters are optional and default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |reason: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let board = Board::from_str(fen).map_err(|e| invalid(e.to_string()))?;
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let halfmove_clock = match fields.get(4) {
            Some(v) => v
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad half-move clock '{v}'")))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(v) => v
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad full-move number '{v}'")))?
                .max(1),
            None => 1,
        };
        Ok(Self::from_board(board, halfmove_clock, fullmove_number))
    }

    /// Full six-field FEN of the current position.
    #[must_use]
    pub fn fen(&self) -> String {
        let board = self.board.to_string();
        let head: Vec<&str> = board.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            head.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    #[must_use]
    pub fn key(&self) -> PositionKey {
        PositionKey::of(&self.board)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<(Color, Piece)> {
        Some((self.board.color_on(square)?, self.board.piece_on(square)?))
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves currently on the undo stack.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<ChessMove> {
        self.undo.last().map(|u| u.mv)
    }

    #[must_use]
    pub fn is_legal(&self, mv: ChessMove) -> bool {
        self.board.legal(mv)
    }

    /// Parse a move in coordinate notation ("e2e4", "e7e8q").
    pub fn parse_uci_move(&self, notation: &str) -> Result<ChessMove, RulesError> {
        let invalid = || RulesError::InvalidMove {
            notation: notation.to_string(),
        };
        if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
            return Err(invalid());
        }
        let from = Square::from_str(&notation[0..2]).map_err(|_| invalid())?;
        let to = Square::from_str(&notation[2..4]).map_err(|_| invalid())?;
        let promotion = match notation[4..].chars().next() {
            None => None,
            Some('n') => Some(Piece::Knight),
            Some('b') => Some(Piece::Bishop),
            Some('r') => Some(Piece::Rook),
            Some('q') => Some(Piece::Queen),
            Some(_) => return Err(invalid()),
        };
        let mv = ChessMove::new(from, to, promotion);
        if self.is_legal(mv) {
            Ok(mv)
        } else {
            Err(RulesError::IllegalMove {
                notation: notation.to_string(),
            })
        }
    }

    /// Parse and push a move in coordinate notation.
    pub fn play_uci(&mut self, notation: &str) -> Result<ChessMove, RulesError> {
        let mv = self.parse_uci_move(notation)?;
        self.push(mv);
        Ok(mv)
    }

    /// Standard algebraic notation of a legal move, for move-history display.
    #[must_use]
    pub fn san(&self, mv: ChessMove) -> String {
        san::to_san(&self.board, mv)
    }

    /// How many times the current position has occurred since the last
    /// capture or pawn move, counting the current occurrence.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        let current = self.board.get_hash();
        let window = self.halfmove_clock as usize + 1;
        self.hashes
            .iter()
            .rev()
            .take(window)
            .filter(|&&h| h == current)
            .count()
    }

    fn is_en_passant(&self, mv: ChessMove) -> bool {
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
            && self.board.piece_on(mv.get_dest()).is_none()
    }

    /// The piece removed from the board by `mv`, if any.
    #[must_use]
    pub fn captured_piece(&self, mv: ChessMove) -> Option<Piece> {
        if self.is_en_passant(mv) {
            Some(Piece::Pawn)
        } else {
            self.board.piece_on(mv.get_dest())
        }
    }

    fn material_is_insufficient(&self) -> bool {
        let b = &self.board;
        let heavy = *b.pieces(Piece::Pawn) | *b.pieces(Piece::Rook) | *b.pieces(Piece::Queen);
        if heavy != EMPTY {
            return false;
        }
        let knights = *b.pieces(Piece::Knight);
        let bishops = *b.pieces(Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }
        if knights != EMPTY {
            return false;
        }
        let light = bishops & BitBoard::new(LIGHT_SQUARES);
        light == EMPTY || light == bishops
    }
}

impl Position for Game {
    type Move = ChessMove;

    fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(&self.board).len()
    }

    fn push(&mut self, mv: ChessMove) {
        debug_assert!(self.board.legal(mv), "illegal move {mv} in {}", self.fen());
        let irreversible =
            self.is_capture(mv) || self.board.piece_on(mv.get_source()) == Some(Piece::Pawn);
        self.undo.push(Undo {
            board: self.board,
            mv,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });
        if self.board.side_to_move() == Color::Black {
            self.fullmove_number += 1;
        }
        self.halfmove_clock = if irreversible { 0 } else { self.halfmove_clock + 1 };
        self.board = self.board.make_move_new(mv);
        self.hashes.push(self.board.get_hash());
    }

    fn pop(&mut self) -> Option<ChessMove> {
        let undo = self.undo.pop()?;
        self.board = undo.board;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.hashes.pop();
        Some(undo.mv)
    }

    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn is_capture(&self, mv: ChessMove) -> bool {
        self.board.piece_on(mv.get_dest()).is_some() || self.is_en_passant(mv)
    }

    fn automatic_draw(&self) -> Option<DrawReason> {
        if self.material_is_insufficient() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
            Some(DrawReason::SeventyFiveMoves)
        } else if self.repetition_count() >= FIVEFOLD_REPETITION {
            Some(DrawReason::FivefoldRepetition)
        } else {
            None
        }
    }

    fn is_insufficient_material(&self) -> bool {
        self.material_is_insufficient()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

impl FromStr for Game {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::from_fen(s)
    }
}
