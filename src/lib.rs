//! # canopy-mcts
//!
//! A root-parallel Monte Carlo Tree Search engine for two-player,
//! perfect-information, alternating-move games.
//!
//! The engine is generic over the game: rules live behind the
//! [`GameState`] trait and the search never inspects them. What the crate
//! provides is the search itself:
//!
//! - an arena-backed tree with stable node indices,
//! - UCB1 selection and a RAVE-blended ("all-moves-as-first") variant,
//! - full expansion of every legal action at a leaf,
//! - uniformly random rollouts, optionally averaged and parallelized,
//! - backpropagation with the alternating-player sign convention,
//! - root parallelism: several independent trees searched concurrently,
//!   merged positionally at the root, decision by highest merged visit
//!   count,
//! - cross-move tree reuse driven by turn notifications.
//!
//! ## Basic usage
//!
//! ```
//! use canopy_mcts::{Action, Coordinator, GameState, SearchConfig};
//!
//! // A toy subtraction game: take 1 or 2 from a pile, the player who
//! // empties it wins.
//! #[derive(Clone, Debug, PartialEq)]
//! struct Take(usize);
//!
//! impl Action for Take {
//!     fn id(&self) -> usize {
//!         self.0
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct Pile {
//!     remaining: usize,
//!     last: Option<Take>,
//! }
//!
//! impl GameState for Pile {
//!     type Action = Take;
//!
//!     fn possible_actions(&self) -> Vec<Take> {
//!         if self.remaining == 0 {
//!             return vec![];
//!         }
//!         (1..=2.min(self.remaining)).map(Take).collect()
//!     }
//!
//!     fn apply(&self, action: &Take) -> Self {
//!         Pile {
//!             remaining: self.remaining - action.0,
//!             last: Some(action.clone()),
//!         }
//!     }
//!
//!     fn is_terminal(&self) -> bool {
//!         self.remaining == 0
//!     }
//!
//!     fn reward(&self) -> f64 {
//!         // The player who emptied the pile made the last move and won.
//!         1.0
//!     }
//!
//!     fn last_action(&self) -> Option<Take> {
//!         self.last.clone()
//!     }
//!
//!     fn same_state(&self, other: &Self) -> bool {
//!         self.remaining == other.remaining
//!     }
//! }
//!
//! fn main() -> canopy_mcts::Result<()> {
//!     let config = SearchConfig::default()
//!         .with_simulation_count(200)
//!         .with_num_trees(2)
//!         .with_seed(7);
//!     let mut coordinator = Coordinator::new(config)?;
//!
//!     let state = Pile { remaining: 5, last: None };
//!     let action = coordinator.decide(&state).expect("pile is not empty");
//!     assert!(action.0 == 1 || action.0 == 2);
//!
//!     // Tell the coordinator what was actually played so the matching
//!     // subtree can be reused on the next turn.
//!     coordinator.advance(&action);
//!     Ok(())
//! }
//! ```
//!
//! ## How a decision is made
//!
//! Each tree repeatedly runs one simulation step: descend with the
//! selection policy to a leaf, expand every legal action there, play a
//! random rollout from one of the new children, and propagate the terminal
//! reward back to the root with alternating signs. Trees run their whole
//! budget independently; only after every tree has finished are the root
//! children summed pairwise and the action with the most merged visits
//! returned.

pub mod config;
pub mod game_state;
pub mod mcts;
pub mod parallel;
pub mod policy;
pub mod rave;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::{SearchConfig, SelectorKind};
pub use game_state::{Action, GameState};
pub use mcts::SearchTree;
pub use parallel::Coordinator;
pub use rave::RaveTable;
pub use stats::SearchStatistics;
pub use tree::{Node, NodeId, Tree};

/// Error type for the search engine.
///
/// Contract violations (an illegal action application inside the game, or
/// diverging root child sets at merge time) are not represented here: they
/// indicate corrupted search state and fail fast by panicking instead.
#[derive(thiserror::Error, Debug)]
pub enum MctsError {
    /// The configuration cannot be run as given.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations.
pub type Result<T> = std::result::Result<T, MctsError>;
