//! Hand-built game trees for exercising the search without chess rules.

use chess::Color;

use crate::eval::Evaluator;
use crate::rules::Position;
use crate::search::{Score, DRAW_SCORE, MATE_SCORE};

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Leaf(Score),
    Branch(Vec<Node>),
}

pub(crate) fn leaf(value: i32) -> Node {
    Node::Leaf(Score::from(value))
}

pub(crate) fn branch(children: Vec<Node>) -> Node {
    Node::Branch(children)
}

/// A cursor into a [`Node`] tree. Moves are child indices.
pub(crate) struct TreePosition {
    root: Node,
    path: Vec<usize>,
}

impl TreePosition {
    pub(crate) fn new(root: Node) -> Self {
        TreePosition {
            root,
            path: Vec::new(),
        }
    }

    pub(crate) fn path(&self) -> &[usize] {
        &self.path
    }

    fn current(&self) -> &Node {
        self.path.iter().fold(&self.root, |node, &i| match node {
            Node::Branch(children) => &children[i],
            Node::Leaf(_) => node,
        })
    }
}

impl Position for TreePosition {
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        match self.current() {
            Node::Branch(children) => (0..children.len()).collect(),
            Node::Leaf(_) => Vec::new(),
        }
    }

    fn push(&mut self, mv: usize) {
        debug_assert!(mv < self.legal_move_count());
        self.path.push(mv);
    }

    fn pop(&mut self) -> Option<usize> {
        self.path.pop()
    }

    fn side_to_move(&self) -> Color {
        if self.path.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    fn is_check(&self) -> bool {
        false
    }

    fn is_capture(&self, _mv: usize) -> bool {
        false
    }
}

/// Scores a tree leaf with its stored value.
pub(crate) struct LeafEvaluator;

impl Evaluator<TreePosition> for LeafEvaluator {
    fn evaluate(&self, position: &TreePosition) -> Score {
        match position.current() {
            Node::Leaf(value) => *value,
            Node::Branch(_) => 0.0,
        }
    }
}

/// Plain minimax without pruning, the reference the search must agree with.
pub(crate) fn minimax<P, E>(position: &mut P, depth: u32, maximizing: bool, evaluator: &E) -> Score
where
    P: Position,
    E: Evaluator<P>,
{
    if depth == 0 {
        return evaluator.evaluate(position);
    }
    let moves = position.legal_moves();
    if moves.is_empty() {
        if !position.is_check() {
            return DRAW_SCORE;
        }
        return if maximizing { -MATE_SCORE } else { MATE_SCORE };
    }
    if position.automatic_draw().is_some() {
        return DRAW_SCORE;
    }
    let values = moves.into_iter().map(|mv| {
        let mut child = position.scoped(mv);
        minimax(&mut *child, depth - 1, !maximizing, evaluator)
    });
    if maximizing {
        values.fold(Score::NEG_INFINITY, Score::max)
    } else {
        values.fold(Score::INFINITY, Score::min)
    }
}
