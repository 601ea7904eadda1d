//! Action-level statistics for RAVE ("all-moves-as-first") selection.
//!
//! The table maps an action id to every node in one tree where that action
//! was taken. Entries are appended during expansion and never removed while
//! a search is running; the table is private to one tree and is rebuilt from
//! the arena after a re-root, because node ids do not survive a rebase.

use std::collections::HashMap;

use crate::game_state::{Action, GameState};
use crate::tree::{NodeId, Tree};

/// Per-tree table of nodes grouped by the action that created them.
#[derive(Debug, Default)]
pub struct RaveTable {
    entries: HashMap<usize, Vec<NodeId>>,
}

impl RaveTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        RaveTable {
            entries: HashMap::new(),
        }
    }

    /// Records that `node` was created by the action with the given id.
    pub fn register(&mut self, action_id: usize, node: NodeId) {
        self.entries.entry(action_id).or_default().push(node);
    }

    /// All nodes registered under the action, in registration order.
    pub fn nodes_for(&self, action_id: usize) -> &[NodeId] {
        self.entries
            .get(&action_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// AMAF statistics for an action, restricted to registered nodes with
    /// `above_depth < depth < below_depth` (both bounds exclusive). The
    /// window keeps far-future reuse of the same action from biasing the
    /// estimate near the top of the tree.
    ///
    /// Returns the accumulated value and visit count over the window.
    pub fn amaf<S: GameState>(
        &self,
        tree: &Tree<S>,
        action_id: usize,
        above_depth: usize,
        below_depth: usize,
    ) -> (f64, u64) {
        let mut value = 0.0;
        let mut visits = 0u64;
        for &id in self.nodes_for(action_id) {
            let node = tree.get(id);
            if node.depth > above_depth && node.depth < below_depth {
                value += node.value;
                visits += node.visits;
            }
        }
        (value, visits)
    }

    /// Reconstructs the table from the arena, registering every non-root
    /// node under the action that produced it. Called after a rebase.
    pub fn rebuild<S: GameState>(&mut self, tree: &Tree<S>) {
        self.entries.clear();
        for (id, node) in tree.iter() {
            if node.parent.is_none() {
                continue;
            }
            if let Some(action) = node.state.last_action() {
                self.register(action.id(), id);
            }
        }
    }

    /// Number of distinct actions with at least one registered node.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
