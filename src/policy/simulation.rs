//! Simulation phase: random playouts from the expansion target.
//!
//! Rollouts are pure simulation against private clones; they never touch
//! the tree. A playout ends at a terminal state or when no legal actions
//! remain, and yields that state's reward.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::game_state::GameState;

/// Plays uniformly random legal actions from `state` until the game ends
/// and returns the terminal value.
///
/// `reward()` speaks for the player who made the last move of the playout.
/// Backpropagation expects a value expressed for the player to move at the
/// rollout start, so under the alternating-player convention the reward is
/// negated when the playout length is even (the last mover then is the
/// same side as the player who moved into the start state).
pub fn rollout<S: GameState, R: Rng>(state: &S, minimax: bool, rng: &mut R) -> f64 {
    let mut current = state.clone();
    let mut plies = 0usize;
    while !current.is_terminal() {
        let actions = current.possible_actions();
        match actions.choose(rng) {
            Some(action) => {
                current = current.apply(action);
                plies += 1;
            }
            None => break,
        }
    }

    let reward = current.reward();
    if minimax && plies % 2 == 0 {
        -reward
    } else {
        reward
    }
}

/// Runs `count` independent rollouts from `state` and returns the sum of
/// their values. With `parallel` set the rollouts run on rayon workers,
/// each with its own generator seeded from `rng` so results never contend
/// on shared entropy state.
pub fn rollout_sum<S: GameState>(
    state: &S,
    count: usize,
    minimax: bool,
    parallel: bool,
    rng: &mut StdRng,
) -> f64 {
    if count <= 1 || !parallel {
        return (0..count).map(|_| rollout(state, minimax, rng)).sum();
    }

    let seeds: Vec<u64> = (0..count).map(|_| rng.gen()).collect();
    seeds
        .into_par_iter()
        .map(|seed| rollout(state, minimax, &mut StdRng::seed_from_u64(seed)))
        .sum()
}
