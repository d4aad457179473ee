//! Evaluation unit tests.

use super::*;
use crate::rules::Game;

fn game(fen: &str) -> Game {
    fen.parse().expect("valid fen")
}

/// Reflect a position top to bottom and swap the colours of all pieces.
pub(crate) fn color_mirror(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let swap_case = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect()
    };
    let placement = fields[0]
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");
    let side = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        let mut rights: Vec<char> = swapped.chars().collect();
        rights.sort_by_key(|c| "KQkq".find(*c));
        rights.into_iter().collect()
    };
    let en_passant = match fields[3] {
        "-" => "-".to_string(),
        sq => {
            let mut chars = sq.chars();
            let file = chars.next().unwrap_or('a');
            let rank = chars.next().and_then(|r| r.to_digit(10)).unwrap_or(1);
            format!("{file}{}", 9 - rank)
        }
    };
    format!(
        "{placement} {side} {castling} {en_passant} {} {}",
        fields.get(4).unwrap_or(&"0"),
        fields.get(5).unwrap_or(&"1")
    )
}

const SYMMETRY_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/1P6/8/8/3q4/8/6p1/R3K3 b Q - 0 1",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
];

#[test]
fn start_position_scores_white_mobility_only() {
    let g = Game::new();
    let breakdown = HeuristicEvaluator.breakdown(&g).expect("not terminal");
    assert_eq!(breakdown.material, 0);
    assert_eq!(breakdown.pawn_structure, 0);
    assert_eq!(breakdown.mobility, 100);
    assert_eq!(evaluate(&g), 1.0);
}

#[test]
fn checkmate_of_white_is_negative_mate() {
    let g = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(evaluate(&g), -MATE_SCORE);
    assert!(HeuristicEvaluator.breakdown(&g).is_none());
}

#[test]
fn checkmate_of_black_is_positive_mate() {
    let g = game("rnbqkbnr/ppppp2p/5p2/6pQ/3PP3/8/PPP2PPP/RNB1KBNR b KQkq - 1 3");
    assert_eq!(evaluate(&g), MATE_SCORE);
}

#[test]
fn stalemate_and_dead_positions_are_exactly_zero() {
    assert_eq!(evaluate(&game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")), 0.0);
    assert_eq!(evaluate(&game("8/8/4k3/8/8/3KN3/8/8 w - - 0 1")), 0.0);
    assert_eq!(evaluate(&game("8/8/4k3/8/8/3K4/8/8 b - - 0 1")), 0.0);
}

#[test]
fn evaluation_is_color_symmetric() {
    for fen in SYMMETRY_FENS {
        let original = game(fen);
        let mirrored = game(&color_mirror(fen));
        assert_eq!(
            evaluate(&original),
            -evaluate(&mirrored),
            "asymmetric evaluation for {fen}"
        );
    }
}

#[test]
fn mobility_rewards_side_to_move() {
    // Same material and the same six legal moves for either side
    let white = game("4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1");
    let black = game("4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 1");
    assert_eq!(white.legal_move_count(), 6);
    assert_eq!(black.legal_move_count(), 6);
    assert_eq!(evaluate(&white), 0.3);
    assert_eq!(evaluate(&black), -0.3);
}

#[test]
fn passed_pawn_counts_in_total() {
    let g = game("4k3/8/8/4P3/8/8/8/4K3 b - - 0 1");
    let breakdown = HeuristicEvaluator.breakdown(&g).expect("not terminal");
    assert_eq!(breakdown.pawn_structure, 40);
    assert_eq!(evaluate(&g), breakdown.score());
}

#[test]
fn kings_add_no_material() {
    let g = game("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let breakdown = HeuristicEvaluator.breakdown(&g).expect("not terminal");
    let rook = piece_value(Piece::Rook) + positional_bonus(Piece::Rook, Color::White, chess::Square::A1);
    assert_eq!(breakdown.material, rook);

    let black = game("r3k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let breakdown = HeuristicEvaluator.breakdown(&black).expect("not terminal");
    assert_eq!(breakdown.material, -rook);
}

#[test]
fn extra_queen_dominates() {
    let up = game("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert!(evaluate(&up) > 8.0);
}

#[test]
fn evaluation_does_not_touch_position() {
    let g = game(SYMMETRY_FENS[2]);
    let before = g.fen();
    let _ = evaluate(&g);
    let _ = HeuristicEvaluator.breakdown(&g);
    assert_eq!(g.fen(), before);
}

#[test]
fn mirror_helper_round_trips() {
    for fen in SYMMETRY_FENS {
        assert_eq!(&color_mirror(&color_mirror(fen)), fen);
    }
}
