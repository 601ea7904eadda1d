//! The four phases of one simulation step.
//!
//! - Selection: descend from the root to a leaf with a bandit policy
//! - Expansion: create one child per legal action at the leaf
//! - Simulation: random playout from the expansion target
//! - Backpropagation: signed value propagation back to the root

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::backpropagate;
pub use expansion::expand;
pub use selection::{RaveSelector, Selector, Ucb1Selector};
pub use simulation::rollout;
