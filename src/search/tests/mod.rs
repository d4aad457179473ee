//! Search unit tests.

pub(crate) mod tree;

use tree::{branch, leaf, minimax, LeafEvaluator, TreePosition};

use super::*;
use crate::eval::HeuristicEvaluator;
use crate::rules::Game;

fn game(fen: &str) -> Game {
    fen.parse().expect("valid fen")
}

/// Max-min-max textbook tree: value 5, and the search can skip four nodes.
fn textbook_tree() -> TreePosition {
    TreePosition::new(branch(vec![
        branch(vec![
            branch(vec![leaf(3), leaf(5)]),
            branch(vec![leaf(6), leaf(9)]),
        ]),
        branch(vec![
            branch(vec![leaf(1), leaf(2)]),
            branch(vec![leaf(0), leaf(-1)]),
        ]),
    ]))
}

const HANGING_QUEEN: &str = "rnb1kbnr/pppp1ppp/8/4p3/4P2q/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

#[test]
fn textbook_tree_value_and_cutoffs() {
    let mut tree = textbook_tree();
    let mut stats = SearchStats::default();
    let value = AlphaBeta::new(&LeafEvaluator, &Unordered, &mut stats).search(
        &mut tree,
        3,
        Score::NEG_INFINITY,
        Score::INFINITY,
        true,
    );
    assert_eq!(value, 5.0);
    assert_eq!(minimax(&mut tree, 3, true, &LeafEvaluator), 5.0);
    // 15 nodes in the full tree; leaf 9 and the last subtree are cut
    assert_eq!(stats.nodes, 11);
    assert!(tree.path().is_empty());
}

#[test]
fn textbook_tree_any_order_same_value() {
    let mut tree = textbook_tree();
    let (forward, _) = search(&mut tree, 3, &LeafEvaluator, &Unordered);
    let (backward, _) = search(&mut tree, 3, &LeafEvaluator, &Reversed(Unordered));
    assert_eq!(forward, backward);
}

#[test]
fn shallow_trees_match_minimax() {
    let trees = vec![
        branch(vec![leaf(4), leaf(-2), leaf(7)]),
        branch(vec![
            branch(vec![leaf(1), leaf(8)]),
            branch(vec![leaf(-3)]),
            branch(vec![leaf(2), leaf(2), leaf(9)]),
        ]),
        branch(vec![
            branch(vec![branch(vec![leaf(5), leaf(-5)]), branch(vec![leaf(0)])]),
            branch(vec![branch(vec![leaf(3), leaf(4), leaf(1)])]),
            branch(vec![branch(vec![leaf(-9)]), branch(vec![leaf(10), leaf(-10)])]),
        ]),
    ];
    for (depth, root) in (1..=3).zip(trees) {
        let mut tree = TreePosition::new(root);
        let expected = minimax(&mut tree, depth, true, &LeafEvaluator);
        let (value, _) = search(&mut tree, depth, &LeafEvaluator, &Unordered);
        assert_eq!(value, expected, "depth {depth}");
    }
}

#[test]
fn leaf_before_horizon_scores_as_draw() {
    // Childless nodes above the horizon are finished games without check
    let mut tree = TreePosition::new(branch(vec![branch(vec![]), leaf(-4)]));
    let (value, _) = search(&mut tree, 2, &LeafEvaluator, &Unordered);
    assert_eq!(value, 0.0);
}

#[test]
fn depth_one_from_start_visits_each_move_once() {
    let mut g = Game::new();
    let (_, stats) = search(&mut g, 1, &HeuristicEvaluator, &HeuristicOrderer);
    assert_eq!(stats.nodes, 1 + 20);
}

#[test]
fn depth_zero_is_static_evaluation() {
    let mut g = game(HANGING_QUEEN);
    let (value, stats) = search(&mut g, 0, &HeuristicEvaluator, &HeuristicOrderer);
    assert_eq!(value, crate::eval::evaluate(&g));
    assert_eq!(stats.nodes, 1);
}

#[test]
fn finds_mate_for_white() {
    let mut g = game("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    for depth in 1..=3 {
        let (value, _) = search(&mut g, depth, &HeuristicEvaluator, &HeuristicOrderer);
        assert_eq!(value, MATE_SCORE, "depth {depth}");
    }
}

#[test]
fn finds_mate_for_black() {
    let mut g = game("4q2k/8/8/8/8/8/5PPP/6K1 b - - 0 1");
    for depth in 1..=2 {
        let (value, _) = search(&mut g, depth, &HeuristicEvaluator, &HeuristicOrderer);
        assert_eq!(value, MATE_SCORE, "depth {depth}");
    }
}

#[test]
fn mated_side_scores_negative_mate() {
    let mut g = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let (value, _) = search(&mut g, 2, &HeuristicEvaluator, &HeuristicOrderer);
    assert_eq!(value, -MATE_SCORE);
}

#[test]
fn repetition_inside_search_is_a_draw() {
    let mut g = Game::new();
    for _ in 0..4 {
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            g.play_uci(mv).expect("legal");
        }
    }
    let (value, stats) = search(&mut g, 3, &HeuristicEvaluator, &HeuristicOrderer);
    assert_eq!(value, DRAW_SCORE);
    assert_eq!(stats.nodes, 1);
}

#[test]
fn alpha_beta_matches_minimax_on_real_positions() {
    let fens = [
        HANGING_QUEEN,
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut g = game(fen);
        let expected = minimax(&mut g, 2, true, &HeuristicEvaluator);
        let (value, _) = search(&mut g, 2, &HeuristicEvaluator, &HeuristicOrderer);
        assert_eq!(value, expected, "{fen}");
    }

    let mut endgame = game("8/8/4k3/8/2R5/3K4/8/8 w - - 0 1");
    let expected = minimax(&mut endgame, 3, true, &HeuristicEvaluator);
    let (value, _) = search(&mut endgame, 3, &HeuristicEvaluator, &HeuristicOrderer);
    assert_eq!(value, expected);
}

#[test]
fn ordering_reduces_nodes_with_a_strong_capture() {
    let mut g = game(HANGING_QUEEN);
    let (ordered_value, ordered) = search(&mut g, 3, &HeuristicEvaluator, &HeuristicOrderer);
    let (reversed_value, reversed) =
        search(&mut g, 3, &HeuristicEvaluator, &Reversed(HeuristicOrderer));
    assert_eq!(ordered_value, reversed_value);
    assert!(
        ordered.nodes < reversed.nodes,
        "ordered={} reversed={}",
        ordered.nodes,
        reversed.nodes
    );
}

#[test]
fn search_leaves_position_untouched() {
    let mut g = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = g.fen();
    let ply = g.ply();
    let _ = search(&mut g, 2, &HeuristicEvaluator, &HeuristicOrderer);
    assert_eq!(g.fen(), before);
    assert_eq!(g.ply(), ply);
}
