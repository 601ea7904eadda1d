//! Root-parallel search coordination.
//!
//! The coordinator owns a fixed number of independent [`SearchTree`]s.
//! Each decision runs every tree to its budget (or deadline) on rayon
//! workers with no cross-tree synchronization, then merges the per-tree
//! root statistics positionally into the first tree and reads the decision
//! off the merged root. The merge barrier is the only point where state
//! crosses trees.

use std::time::Instant;

use log::{debug, warn};
use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::game_state::{Action, GameState};
use crate::mcts::SearchTree;
use crate::stats::SearchStatistics;
use crate::Result;

/// Per-tree seed streams derived from one base seed (splitmix64 increment).
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Persistent parallel search coordinator.
///
/// Call [`decide`](Coordinator::decide) once per turn and
/// [`advance`](Coordinator::advance) for every action actually played (by
/// either side) so the trees can be reused across real moves.
pub struct Coordinator<S: GameState> {
    config: SearchConfig,
    trees: Vec<SearchTree<S>>,
    base_seed: u64,
    statistics: SearchStatistics,
}

impl<S: GameState> Coordinator<S> {
    /// Creates a coordinator after validating the configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let base_seed = config.seed.unwrap_or_else(rand::random);
        Ok(Coordinator {
            config,
            trees: Vec::new(),
            base_seed,
            statistics: SearchStatistics::new(),
        })
    }

    /// Searches from `current_state` and returns the merged best action, or
    /// `None` when the state admits no legal action (terminal root).
    ///
    /// # Panics
    ///
    /// Panics if the trees expand diverging root child sets, which means
    /// `possible_actions` is nondeterministic for the root state. That is a
    /// contract breach in the game implementation, not a recoverable
    /// condition.
    pub fn decide(&mut self, current_state: &S) -> Option<S::Action> {
        self.prepare(current_state);

        let deadline = self.config.max_time.map(|limit| Instant::now() + limit);
        self.trees
            .par_iter_mut()
            .for_each(|tree| tree.run(deadline));

        self.merge();
        self.collect_statistics();

        self.trees.first().and_then(|tree| tree.best_action())
    }

    /// Notifies the coordinator that `action` was actually played. Every
    /// tree re-roots onto the matching child; if any tree has no match the
    /// trees are discarded and the next `decide` rebuilds from scratch.
    pub fn advance(&mut self, action: &S::Action) {
        if self.trees.is_empty() {
            return;
        }
        let id = action.id();
        let advanced = self.trees.iter_mut().all(|tree| tree.advance(id));
        if advanced {
            debug!("advanced all trees on action {:?}", action);
        } else {
            warn!("action {:?} not in the search trees, discarding them", action);
            self.trees.clear();
        }
    }

    /// Aggregate statistics for the most recent decision.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Read access to the per-tree searchers (the first one holds the
    /// merged root statistics after a decision).
    pub fn trees(&self) -> &[SearchTree<S>] {
        &self.trees
    }

    /// Reuses the retained trees when they are rooted at `state`, otherwise
    /// rebuilds every tree from a clone of it.
    fn prepare(&mut self, state: &S) {
        let reusable = self.trees.len() == self.config.num_trees
            && self
                .trees
                .iter()
                .all(|tree| tree.root_state().same_state(state));
        if reusable {
            debug!("reusing {} retained trees", self.trees.len());
            return;
        }

        if !self.trees.is_empty() {
            debug!("retained trees do not match the live state, rebuilding");
        }
        self.trees = (0..self.config.num_trees)
            .map(|i| {
                let seed = self.base_seed.wrapping_add((i as u64).wrapping_mul(SEED_STRIDE));
                SearchTree::new(state.clone(), self.config.clone(), seed)
            })
            .collect();
    }

    /// Sums every tree's root-child statistics into the first tree,
    /// aligning children positionally. Expansion enumerates legal actions
    /// deterministically, so all trees must hold identical root action
    /// sets; any divergence is fatal.
    fn merge(&mut self) {
        let Some((reference, rest)) = self.trees.split_first_mut() else {
            return;
        };

        let ref_children: Vec<_> = reference
            .tree()
            .get(reference.tree().root())
            .children
            .clone();

        for (tree_index, other) in rest.iter().enumerate() {
            let other_root = other.tree().get(other.tree().root());
            assert_eq!(
                ref_children.len(),
                other_root.children.len(),
                "root child sets diverged across search trees: tree 0 expanded {} children, tree {} expanded {}",
                ref_children.len(),
                tree_index + 1,
                other_root.children.len(),
            );

            for (slot, (&ref_child, &other_child)) in
                ref_children.iter().zip(&other_root.children).enumerate()
            {
                let ref_action = reference
                    .tree()
                    .get(ref_child)
                    .state
                    .last_action()
                    .map(|a| a.id());
                let other_node = other.tree().get(other_child);
                let other_action = other_node.state.last_action().map(|a| a.id());
                assert_eq!(
                    ref_action,
                    other_action,
                    "root children misaligned at slot {} between tree 0 and tree {}",
                    slot,
                    tree_index + 1,
                );

                let (visits, value) = (other_node.visits, other_node.value);
                let merged = reference.tree_mut().get_mut(ref_child);
                merged.visits += visits;
                merged.value += value;
            }
        }
    }

    fn collect_statistics(&mut self) {
        let mut aggregate = match self.trees.first() {
            Some(tree) => tree.statistics().clone(),
            None => SearchStatistics::new(),
        };
        for tree in self.trees.iter().skip(1) {
            aggregate.merge(tree.statistics());
        }
        self.statistics = aggregate;
    }
}
