//! Expansion phase: create one child per legal action at a leaf.

use rand::Rng;

use crate::game_state::{Action, GameState};
use crate::rave::RaveTable;
use crate::tree::{NodeId, Tree};

/// Expands `leaf` by creating a child for every legal action and returns
/// the node the simulation should continue from.
///
/// Children are created in the deterministic order `possible_actions`
/// returns them; the parallel merge relies on every tree producing the same
/// child order for the same state. Which of the new children becomes the
/// rollout target is chosen uniformly at random instead, so repeated
/// searches do not always play out the same branch first.
///
/// A terminal leaf (no legal actions) is returned unchanged and becomes the
/// simulation target itself.
pub fn expand<S: GameState, R: Rng>(
    tree: &mut Tree<S>,
    mut rave: Option<&mut RaveTable>,
    leaf: NodeId,
    rng: &mut R,
) -> NodeId {
    debug_assert!(tree.is_leaf(leaf), "expansion target must be a leaf");

    let actions = tree.get(leaf).state.possible_actions();
    if actions.is_empty() {
        return leaf;
    }

    for action in &actions {
        let child_state = tree.get(leaf).state.apply(action);
        let child = tree.add_child(leaf, child_state);
        if let Some(table) = rave.as_deref_mut() {
            table.register(action.id(), child);
        }
    }

    let children = &tree.get(leaf).children;
    children[rng.gen_range(0..children.len())]
}
