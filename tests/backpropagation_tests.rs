//! Tests for signed value backpropagation.

use canopy_mcts::policy::backpropagate;
use canopy_mcts::{Action, GameState, NodeId, Tree};

#[derive(Clone, Debug, PartialEq)]
struct Mv(usize);

impl Action for Mv {
    fn id(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Chain {
    depth: usize,
    last: Option<Mv>,
}

impl GameState for Chain {
    type Action = Mv;

    fn possible_actions(&self) -> Vec<Mv> {
        vec![Mv(self.depth)]
    }

    fn apply(&self, action: &Mv) -> Self {
        Chain {
            depth: self.depth + 1,
            last: Some(action.clone()),
        }
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn reward(&self) -> f64 {
        0.0
    }

    fn last_action(&self) -> Option<Mv> {
        self.last.clone()
    }

    fn same_state(&self, other: &Self) -> bool {
        self.depth == other.depth
    }
}

/// Builds root -> n1 -> n2 -> ... of the requested length and returns the
/// node ids from the root down.
fn chain(length: usize) -> (Tree<Chain>, Vec<NodeId>) {
    let mut tree = Tree::new(Chain {
        depth: 0,
        last: None,
    });
    let mut ids = vec![tree.root()];
    for _ in 0..length {
        let parent = *ids.last().unwrap();
        let action = Mv(tree.get(parent).state.depth);
        let state = tree.get(parent).state.apply(&action);
        ids.push(tree.add_child(parent, state));
    }
    (tree, ids)
}

#[test]
fn minimax_alternates_sign_by_depth_parity() {
    let (mut tree, ids) = chain(3);
    let deepest = ids[3];

    backpropagate(&mut tree, deepest, 1.0, 1, true);

    // The target keeps its own sign; each step towards the root flips it.
    assert_eq!(tree.get(ids[3]).value, 1.0);
    assert_eq!(tree.get(ids[2]).value, -1.0);
    assert_eq!(tree.get(ids[1]).value, 1.0);
    assert_eq!(tree.get(ids[0]).value, -1.0);
    for &id in &ids {
        assert_eq!(tree.get(id).visits, 1);
    }
}

#[test]
fn depths_two_apart_share_sign() {
    let (mut tree, ids) = chain(4);
    backpropagate(&mut tree, ids[4], 0.5, 1, true);

    let signs: Vec<f64> = ids.iter().map(|&id| tree.get(id).value.signum()).collect();
    assert_eq!(signs[4], signs[2]);
    assert_eq!(signs[2], signs[0]);
    assert_eq!(signs[3], signs[1]);
    assert_eq!(signs[4], -signs[3]);
}

#[test]
fn without_minimax_all_levels_accumulate_the_same_value() {
    let (mut tree, ids) = chain(3);
    backpropagate(&mut tree, ids[3], 0.75, 1, false);

    for &id in &ids {
        assert_eq!(tree.get(id).value, 0.75);
        assert_eq!(tree.get(id).visits, 1);
    }
}

#[test]
fn rollout_count_scales_visit_increments() {
    let (mut tree, ids) = chain(2);
    // Four rollouts whose rewards summed to 2.0.
    backpropagate(&mut tree, ids[2], 2.0, 4, true);

    assert_eq!(tree.get(ids[2]).visits, 4);
    assert_eq!(tree.get(ids[2]).value, 2.0);
    assert_eq!(tree.get(ids[1]).visits, 4);
    assert_eq!(tree.get(ids[1]).value, -2.0);
    assert_eq!(tree.get(ids[0]).visits, 4);
    assert_eq!(tree.get(ids[0]).value, 2.0);
    // The mean stays the per-rollout average.
    assert!((tree.get(ids[2]).mean() - 0.5).abs() < 1e-12);
}

#[test]
fn repeated_walks_accumulate() {
    let (mut tree, ids) = chain(1);
    backpropagate(&mut tree, ids[1], 1.0, 1, true);
    backpropagate(&mut tree, ids[1], -1.0, 1, true);
    backpropagate(&mut tree, ids[1], 1.0, 1, true);

    assert_eq!(tree.get(ids[1]).visits, 3);
    assert_eq!(tree.get(ids[1]).value, 1.0);
    assert_eq!(tree.get(ids[0]).visits, 3);
    assert_eq!(tree.get(ids[0]).value, -1.0);
}
