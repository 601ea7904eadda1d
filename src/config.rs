//! Configuration options for the search engine.

use std::time::Duration;

use crate::{MctsError, Result};

/// Which selection policy a tree uses during the descent phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectorKind {
    /// Plain UCB1 with the configured exploration constant.
    Ucb1,

    /// UCB1 blended with RAVE (all-moves-as-first) statistics.
    Rave {
        /// Equivalence parameter controlling how quickly AMAF evidence is
        /// discounted as direct visits accumulate.
        bias: f64,

        /// Depth window below a node within which AMAF statistics are
        /// collected. Must be at least 2 so the window `(d, d + window)`
        /// admits the node's own children at depth `d + 1`.
        depth_window: usize,
    },
}

/// Configuration for a search.
///
/// # Example
///
/// ```
/// use canopy_mcts::{SearchConfig, SelectorKind};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_simulation_count(10_000)
///     .with_num_trees(8)
///     .with_exploration_constant(1.0)
///     .with_rave(0.25, 20)
///     .with_max_time(Duration::from_millis(900));
/// assert!(matches!(config.selector, SelectorKind::Rave { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of simulation steps each tree runs per decision.
    pub simulation_count: usize,

    /// Number of independent trees searched in parallel and merged.
    pub num_trees: usize,

    /// Alternating-player (minimax) sign convention. When on, values are
    /// negated level by level during backpropagation and the selectors
    /// invert the mean accordingly. Leave on for two-player games.
    pub minimax: bool,

    /// Exploration constant for UCB1. The canonical value is sqrt(2).
    pub exploration_constant: f64,

    /// Independent rollouts run from each simulation target; their rewards
    /// are accumulated and the target's visit count grows by this amount.
    pub rollout_count: usize,

    /// Run the rollouts of one simulation step on parallel workers. Only
    /// worthwhile when `rollout_count` is large and rollouts are expensive.
    pub parallel_rollouts: bool,

    /// Selection policy.
    pub selector: SelectorKind,

    /// Wall-clock deadline for one decision. Checked between simulation
    /// steps only; a partial search is still a valid decision.
    pub max_time: Option<Duration>,

    /// Base seed for the per-tree random generators. Each tree derives its
    /// own stream from this. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            simulation_count: 100,
            num_trees: 4,
            minimax: true,
            exploration_constant: std::f64::consts::SQRT_2,
            rollout_count: 1,
            parallel_rollouts: false,
            selector: SelectorKind::Ucb1,
            max_time: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the per-tree simulation budget.
    pub fn with_simulation_count(mut self, count: usize) -> Self {
        self.simulation_count = count;
        self
    }

    /// Sets the number of parallel trees.
    pub fn with_num_trees(mut self, trees: usize) -> Self {
        self.num_trees = trees;
        self
    }

    /// Enables or disables the alternating-player sign convention.
    pub fn with_minimax(mut self, minimax: bool) -> Self {
        self.minimax = minimax;
        self
    }

    /// Sets the UCB1 exploration constant.
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of rollouts per simulation step.
    pub fn with_rollout_count(mut self, count: usize) -> Self {
        self.rollout_count = count;
        self
    }

    /// Runs per-step rollouts on parallel workers.
    pub fn with_parallel_rollouts(mut self, parallel: bool) -> Self {
        self.parallel_rollouts = parallel;
        self
    }

    /// Switches selection to the RAVE-blended policy.
    pub fn with_rave(mut self, bias: f64, depth_window: usize) -> Self {
        self.selector = SelectorKind::Rave { bias, depth_window };
        self
    }

    /// Switches selection back to plain UCB1.
    pub fn with_ucb1(mut self) -> Self {
        self.selector = SelectorKind::Ucb1;
        self
    }

    /// Sets the wall-clock deadline for a decision.
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the base random seed for reproducible searches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.simulation_count == 0 {
            return Err(MctsError::InvalidConfiguration(
                "simulation_count must be at least 1".into(),
            ));
        }
        if self.num_trees == 0 {
            return Err(MctsError::InvalidConfiguration(
                "num_trees must be at least 1".into(),
            ));
        }
        if self.rollout_count == 0 {
            return Err(MctsError::InvalidConfiguration(
                "rollout_count must be at least 1".into(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MctsError::InvalidConfiguration(
                "exploration_constant must be finite and non-negative".into(),
            ));
        }
        if let SelectorKind::Rave { bias, depth_window } = self.selector {
            if !bias.is_finite() {
                return Err(MctsError::InvalidConfiguration(
                    "rave bias must be finite".into(),
                ));
            }
            if depth_window < 2 {
                return Err(MctsError::InvalidConfiguration(
                    "rave depth_window must be at least 2".into(),
                ));
            }
        }
        Ok(())
    }
}
