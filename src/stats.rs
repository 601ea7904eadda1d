//! Statistics collected during a search.

use std::time::Duration;

/// Statistics for one tree's search, or the aggregate over all trees after
/// a parallel decision.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of simulation steps performed.
    pub simulations: usize,

    /// Wall time spent searching.
    pub total_time: Duration,

    /// Total number of nodes.
    pub tree_size: usize,

    /// Deepest simulation target reached.
    pub max_depth: usize,

    /// Whether the search stopped before its budget because of a deadline.
    pub stopped_early: bool,
}

impl SearchStatistics {
    /// Creates an empty statistics object.
    pub fn new() -> Self {
        SearchStatistics {
            simulations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // the root
            max_depth: 0,
            stopped_early: false,
        }
    }

    /// Average time per simulation step in microseconds.
    pub fn avg_time_per_simulation_us(&self) -> f64 {
        if self.simulations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.simulations as f64
    }

    /// Simulation steps per second.
    pub fn simulations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.simulations as f64 / self.total_time.as_secs_f64()
    }

    /// Folds another tree's statistics into this aggregate: counts add up,
    /// depth takes the maximum, wall time takes the longest tree since the
    /// trees ran concurrently.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.simulations += other.simulations;
        self.tree_size += other.tree_size;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.total_time = self.total_time.max(other.total_time);
        self.stopped_early |= other.stopped_early;
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "MCTS search statistics:\n\
             - Simulations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per simulation: {:.3} µs\n\
             - Simulations per second: {:.1}\n\
             - Stopped early: {}",
            self.simulations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_simulation_us(),
            self.simulations_per_second(),
            self.stopped_early
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
