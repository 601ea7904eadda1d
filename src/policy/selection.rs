//! Selection policies for the descent phase.
//!
//! A selector picks which child to move into at every interior node until a
//! leaf is reached. The two policies form a small closed set chosen by
//! configuration at tree construction time; both evaluate children in a
//! freshly shuffled order per call so that repeated equal scores do not
//! systematically favor one branch.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{SearchConfig, SelectorKind};
use crate::game_state::{Action, GameState};
use crate::rave::RaveTable;
use crate::tree::{NodeId, Tree};
use crate::utils::{rave_beta, ucb1_score};

/// Active selection policy for one tree.
#[derive(Debug, Clone)]
pub enum Selector {
    Ucb1(Ucb1Selector),
    Rave(RaveSelector),
}

impl Selector {
    /// Builds the selector the configuration asks for.
    pub fn from_config(config: &SearchConfig) -> Self {
        match config.selector {
            SelectorKind::Ucb1 => Selector::Ucb1(Ucb1Selector {
                exploration_constant: config.exploration_constant,
                minimax: config.minimax,
            }),
            SelectorKind::Rave { bias, depth_window } => Selector::Rave(RaveSelector {
                exploration_constant: config.exploration_constant,
                minimax: config.minimax,
                bias,
                depth_window,
            }),
        }
    }

    /// Picks the child of `node` to descend into. `node` must not be a leaf.
    pub fn select_child<S: GameState, R: Rng>(
        &self,
        tree: &Tree<S>,
        node: NodeId,
        rave: Option<&RaveTable>,
        rng: &mut R,
    ) -> NodeId {
        match self {
            Selector::Ucb1(s) => s.select_child(tree, node, rng),
            Selector::Rave(s) => s.select_child(tree, node, rave, rng),
        }
    }
}

/// Upper Confidence Bound 1 policy.
///
/// Scores a child as `sign * mean + c * sqrt(ln(parent_visits) /
/// child_visits)`, where `sign` is -1 under the alternating-player
/// convention: a child's value speaks for the player to move at that child,
/// the opponent of the player choosing here. An unvisited child is selected
/// immediately.
#[derive(Debug, Clone)]
pub struct Ucb1Selector {
    pub exploration_constant: f64,
    pub minimax: bool,
}

impl Ucb1Selector {
    pub fn select_child<S: GameState, R: Rng>(
        &self,
        tree: &Tree<S>,
        node: NodeId,
        rng: &mut R,
    ) -> NodeId {
        let parent = tree.get(node);
        debug_assert!(!parent.children.is_empty(), "selection reached a leaf");

        let sign = if self.minimax { -1.0 } else { 1.0 };
        let mut order: Vec<usize> = (0..parent.children.len()).collect();
        order.shuffle(rng);

        let mut best = parent.children[order[0]];
        let mut best_score = f64::NEG_INFINITY;
        for &i in &order {
            let child_id = parent.children[i];
            let child = tree.get(child_id);
            if child.visits == 0 {
                return child_id;
            }
            let score = ucb1_score(
                sign * child.mean(),
                parent.visits,
                child.visits,
                self.exploration_constant,
            );
            if score > best_score {
                best_score = score;
                best = child_id;
            }
        }
        best
    }
}

/// UCB1 blended with RAVE (all-moves-as-first) statistics.
///
/// The AMAF estimate for a child's action is drawn from every node in the
/// tree where the action was taken, restricted to the depth window
/// `(node.depth, node.depth + depth_window)`. The blend weight beta tends
/// to 1 while a child has little direct evidence and to 0 as visits
/// accumulate, at which point plain UCB1 dominates. A child with no direct
/// visits, or no AMAF evidence at all, is selected immediately.
#[derive(Debug, Clone)]
pub struct RaveSelector {
    pub exploration_constant: f64,
    pub minimax: bool,
    pub bias: f64,
    pub depth_window: usize,
}

impl RaveSelector {
    pub fn select_child<S: GameState, R: Rng>(
        &self,
        tree: &Tree<S>,
        node: NodeId,
        rave: Option<&RaveTable>,
        rng: &mut R,
    ) -> NodeId {
        let parent = tree.get(node);
        debug_assert!(!parent.children.is_empty(), "selection reached a leaf");

        let sign = if self.minimax { -1.0 } else { 1.0 };
        let above = parent.depth;
        let below = parent.depth + self.depth_window;
        let mut order: Vec<usize> = (0..parent.children.len()).collect();
        order.shuffle(rng);

        let mut best = parent.children[order[0]];
        let mut best_score = f64::NEG_INFINITY;
        for &i in &order {
            let child_id = parent.children[i];
            let child = tree.get(child_id);
            if child.visits == 0 {
                return child_id;
            }

            let action_id = child.state.last_action().map(|a| a.id());
            let (amaf_value, amaf_visits) = match (rave, action_id) {
                (Some(table), Some(id)) => table.amaf(tree, id, above, below),
                _ => (0.0, 0),
            };
            if amaf_visits == 0 {
                // No AMAF evidence for this action yet: explore it.
                return child_id;
            }

            let rave_value = sign * amaf_value / amaf_visits as f64;
            let ucb_value = sign * child.mean();
            let exploration = self.exploration_constant
                * ((parent.visits.max(1) as f64).ln() / child.visits as f64).sqrt();
            let beta = rave_beta(amaf_visits, child.visits, self.bias);

            let score = (1.0 - beta) * ucb_value + beta * rave_value + exploration;
            if score > best_score {
                best_score = score;
                best = child_id;
            }
        }
        best
    }
}
