//! One search tree: the simulate loop and cross-move reuse.
//!
//! A [`SearchTree`] drives single simulation steps (select, expand, roll
//! out, backpropagate) against its private arena, its private RAVE table
//! and its private random generator. The parallel coordinator owns several
//! of these and merges their roots; a `SearchTree` on its own is a complete
//! single-threaded searcher.

use std::time::Instant;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{SearchConfig, SelectorKind};
use crate::game_state::GameState;
use crate::policy::{backpropagate, expand, selection::Selector, simulation::rollout_sum};
use crate::rave::RaveTable;
use crate::stats::SearchStatistics;
use crate::tree::{NodeId, Tree};

/// A single search tree with its own state, policy and randomness.
pub struct SearchTree<S: GameState> {
    tree: Tree<S>,
    config: SearchConfig,
    selector: Selector,
    rave: Option<RaveTable>,
    rng: StdRng,
    statistics: SearchStatistics,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree rooted at `state` with its own generator seeded from
    /// `seed`. The RAVE table is only allocated when the configuration
    /// selects the RAVE policy.
    pub fn new(state: S, config: SearchConfig, seed: u64) -> Self {
        let selector = Selector::from_config(&config);
        let rave = match config.selector {
            SelectorKind::Rave { .. } => Some(RaveTable::new()),
            SelectorKind::Ucb1 => None,
        };
        SearchTree {
            tree: Tree::new(state),
            selector,
            rave,
            rng: StdRng::seed_from_u64(seed),
            statistics: SearchStatistics::new(),
            config,
        }
    }

    /// Runs the configured simulation budget, stopping early if `deadline`
    /// passes. The deadline is only checked between steps; a started step
    /// always runs to completion.
    pub fn run(&mut self, deadline: Option<Instant>) {
        self.statistics = SearchStatistics::new();
        let start = Instant::now();

        for i in 0..self.config.simulation_count {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    self.statistics.stopped_early = true;
                    debug!("deadline reached after {} of {} simulations", i, self.config.simulation_count);
                    break;
                }
            }
            self.step();
            self.statistics.simulations = i + 1;
        }

        self.statistics.total_time = start.elapsed();
        self.statistics.tree_size = self.tree.len();
        trace!("tree finished: {} nodes, max depth {}", self.tree.len(), self.statistics.max_depth);
    }

    /// Executes one simulation step.
    pub fn step(&mut self) {
        // Selection: descend to a leaf.
        let mut node = self.tree.root();
        while !self.tree.is_leaf(node) {
            node = self
                .selector
                .select_child(&self.tree, node, self.rave.as_ref(), &mut self.rng);
        }

        // Expansion: all legal actions at once; terminal leaves expand to
        // themselves.
        let target = expand(&mut self.tree, self.rave.as_mut(), node, &mut self.rng);
        let depth = self.tree.get(target).depth;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);

        // Simulation.
        let reward = rollout_sum(
            &self.tree.get(target).state,
            self.config.rollout_count,
            self.config.minimax,
            self.config.parallel_rollouts,
            &mut self.rng,
        );

        // Backpropagation.
        backpropagate(
            &mut self.tree,
            target,
            reward,
            self.config.rollout_count as u64,
            self.config.minimax,
        );
    }

    /// Best root action by visit count, `None` if the root has no children.
    pub fn best_action(&self) -> Option<S::Action> {
        self.tree.best_action()
    }

    /// Advances the tree after the real game played the action with the
    /// given id: the matching root child becomes the new root and its
    /// siblings are discarded. Returns false when no child matches, in
    /// which case the tree is left untouched and the caller should rebuild
    /// from the live state.
    pub fn advance(&mut self, action_id: usize) -> bool {
        match self.tree.find_child_by_action(action_id) {
            Some(child) => {
                self.tree.rebase(child);
                if let Some(table) = self.rave.as_mut() {
                    // Node ids changed; re-register the surviving nodes.
                    table.rebuild(&self.tree);
                }
                true
            }
            None => false,
        }
    }

    /// The state at the root of this tree.
    pub fn root_state(&self) -> &S {
        &self.tree.get(self.tree.root()).state
    }

    /// Read access to the underlying tree.
    pub fn tree(&self) -> &Tree<S> {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree<S> {
        &mut self.tree
    }

    /// Root node id of the underlying tree.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Statistics for the most recent `run`.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
