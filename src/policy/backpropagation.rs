//! Backpropagation phase: signed value propagation from the simulation
//! target back to the root.

use crate::game_state::GameState;
use crate::tree::{NodeId, Tree};

/// Accumulates a simulation result at `node` and walks the parent links up
/// to the root, incrementing `visits` by `count` at every level.
///
/// With `minimax` set the value is negated each time the walk moves to a
/// parent, because each level represents the opposing player's perspective.
/// The negation happens after moving up, never at the target itself, so the
/// target's own sign is preserved.
pub fn backpropagate<S: GameState>(
    tree: &mut Tree<S>,
    node: NodeId,
    value: f64,
    count: u64,
    minimax: bool,
) {
    let mut v = value;
    let mut current = node;

    let target = tree.get_mut(current);
    target.visits += count;
    target.value += v;

    while let Some(parent) = tree.get(current).parent {
        if minimax {
            v = -v;
        }
        let ancestor = tree.get_mut(parent);
        ancestor.visits += count;
        ancestor.value += v;
        current = parent;
    }
}
