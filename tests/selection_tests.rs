//! Tests for the UCB1 selection policy.

use rand::rngs::StdRng;
use rand::SeedableRng;

use canopy_mcts::policy::selection::Ucb1Selector;
use canopy_mcts::{Action, GameState, NodeId, Tree};

#[derive(Clone, Debug, PartialEq)]
struct Mv(usize);

impl Action for Mv {
    fn id(&self) -> usize {
        self.0
    }
}

/// A flat game: the root offers a fixed action list, every successor is
/// terminal.
#[derive(Clone, Debug)]
struct Flat {
    actions: Vec<usize>,
    last: Option<Mv>,
}

impl Flat {
    fn root(actions: &[usize]) -> Self {
        Flat {
            actions: actions.to_vec(),
            last: None,
        }
    }
}

impl GameState for Flat {
    type Action = Mv;

    fn possible_actions(&self) -> Vec<Mv> {
        self.actions.iter().copied().map(Mv).collect()
    }

    fn apply(&self, action: &Mv) -> Self {
        Flat {
            actions: Vec::new(),
            last: Some(action.clone()),
        }
    }

    fn is_terminal(&self) -> bool {
        self.actions.is_empty()
    }

    fn reward(&self) -> f64 {
        0.0
    }

    fn last_action(&self) -> Option<Mv> {
        self.last.clone()
    }

    fn same_state(&self, other: &Self) -> bool {
        self.actions == other.actions && self.last == other.last
    }
}

fn expanded_root(actions: &[usize]) -> (Tree<Flat>, Vec<NodeId>) {
    let mut tree = Tree::new(Flat::root(actions));
    let root = tree.root();
    let ids: Vec<NodeId> = tree
        .get(root)
        .state
        .possible_actions()
        .iter()
        .map(|action| {
            let state = tree.get(root).state.apply(action);
            tree.add_child(root, state)
        })
        .collect();
    (tree, ids)
}

#[test]
fn unvisited_child_dominates_regardless_of_siblings() {
    let (mut tree, ids) = expanded_root(&[0, 1, 2]);
    let root = tree.root();
    tree.get_mut(root).visits = 100;
    tree.get_mut(ids[0]).visits = 50;
    tree.get_mut(ids[0]).value = 49.0;
    tree.get_mut(ids[2]).visits = 49;
    tree.get_mut(ids[2]).value = 49.0;
    // ids[1] never visited.

    let selector = Ucb1Selector {
        exploration_constant: std::f64::consts::SQRT_2,
        minimax: true,
    };
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        assert_eq!(selector.select_child(&tree, root, &mut rng), ids[1]);
    }
}

#[test]
fn picks_highest_mean_without_minimax() {
    let (mut tree, ids) = expanded_root(&[0, 1]);
    let root = tree.root();
    tree.get_mut(root).visits = 20;
    tree.get_mut(ids[0]).visits = 10;
    tree.get_mut(ids[0]).value = 2.0;
    tree.get_mut(ids[1]).visits = 10;
    tree.get_mut(ids[1]).value = 8.0;

    // Exploration disabled to isolate the exploitation term.
    let selector = Ucb1Selector {
        exploration_constant: 0.0,
        minimax: false,
    };
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..20 {
        assert_eq!(selector.select_child(&tree, root, &mut rng), ids[1]);
    }
}

#[test]
fn minimax_inverts_the_mean() {
    let (mut tree, ids) = expanded_root(&[0, 1]);
    let root = tree.root();
    tree.get_mut(root).visits = 20;
    tree.get_mut(ids[0]).visits = 10;
    tree.get_mut(ids[0]).value = 2.0;
    tree.get_mut(ids[1]).visits = 10;
    tree.get_mut(ids[1]).value = 8.0;

    // A child's value speaks for the player to move at that child, the
    // opponent of the player choosing here, who therefore wants the child
    // with the lower mean.
    let selector = Ucb1Selector {
        exploration_constant: 0.0,
        minimax: true,
    };
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        assert_eq!(selector.select_child(&tree, root, &mut rng), ids[0]);
    }
}

#[test]
fn less_visited_child_gets_exploration_bonus() {
    let (mut tree, ids) = expanded_root(&[0, 1]);
    let root = tree.root();
    tree.get_mut(root).visits = 1000;
    // Equal means, very different visit counts.
    tree.get_mut(ids[0]).visits = 900;
    tree.get_mut(ids[0]).value = 450.0;
    tree.get_mut(ids[1]).visits = 100;
    tree.get_mut(ids[1]).value = 50.0;

    let selector = Ucb1Selector {
        exploration_constant: std::f64::consts::SQRT_2,
        minimax: false,
    };
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..20 {
        assert_eq!(selector.select_child(&tree, root, &mut rng), ids[1]);
    }
}

#[test]
fn exact_ties_are_broken_at_random() {
    let (mut tree, ids) = expanded_root(&[0, 1]);
    let root = tree.root();
    tree.get_mut(root).visits = 20;
    for &id in &ids {
        tree.get_mut(id).visits = 10;
        tree.get_mut(id).value = 5.0;
    }

    let selector = Ucb1Selector {
        exploration_constant: std::f64::consts::SQRT_2,
        minimax: true,
    };
    let mut rng = StdRng::seed_from_u64(5);
    let mut seen = [false, false];
    for _ in 0..200 {
        let picked = selector.select_child(&tree, root, &mut rng);
        seen[ids.iter().position(|&id| id == picked).unwrap()] = true;
    }
    assert!(seen[0] && seen[1], "both tied children should be selected");
}
