//! Tests for the rollout phase.

use rand::rngs::StdRng;
use rand::SeedableRng;

use canopy_mcts::policy::rollout;
use canopy_mcts::policy::simulation::rollout_sum;
use canopy_mcts::{Action, GameState};

#[derive(Clone, Debug, PartialEq)]
struct Step;

impl Action for Step {
    fn id(&self) -> usize {
        0
    }
}

/// Exactly one legal action per state; terminates after a fixed number of
/// applied actions. The last mover wins.
#[derive(Clone, Debug)]
struct Countdown {
    remaining: usize,
    last: Option<Step>,
}

impl Countdown {
    fn new(remaining: usize) -> Self {
        Countdown {
            remaining,
            last: None,
        }
    }
}

impl GameState for Countdown {
    type Action = Step;

    fn possible_actions(&self) -> Vec<Step> {
        if self.remaining == 0 {
            return vec![];
        }
        vec![Step]
    }

    fn apply(&self, _action: &Step) -> Self {
        Countdown {
            remaining: self.remaining - 1,
            last: Some(Step),
        }
    }

    fn is_terminal(&self) -> bool {
        self.remaining == 0
    }

    fn reward(&self) -> f64 {
        1.0
    }

    fn last_action(&self) -> Option<Step> {
        self.last.clone()
    }

    fn same_state(&self, other: &Self) -> bool {
        self.remaining == other.remaining
    }
}

#[test]
fn rollout_terminates_after_the_known_number_of_steps() {
    let mut rng = StdRng::seed_from_u64(71);
    // Would hang forever if the loop failed to reach the terminal state.
    let value = rollout(&Countdown::new(1000), false, &mut rng);
    assert_eq!(value, 1.0);
}

#[test]
fn minimax_rollout_reports_the_value_for_the_player_to_move() {
    let mut rng = StdRng::seed_from_u64(72);

    // Odd playout length: the player to move at the start makes the last
    // move and wins, so the value comes back positive.
    assert_eq!(rollout(&Countdown::new(3), true, &mut rng), 1.0);

    // Even length: the opponent makes the last move.
    assert_eq!(rollout(&Countdown::new(4), true, &mut rng), -1.0);

    // A terminal start state was reached by the opponent's final move.
    assert_eq!(rollout(&Countdown::new(0), true, &mut rng), -1.0);
}

#[test]
fn without_minimax_the_reward_passes_through_unchanged() {
    let mut rng = StdRng::seed_from_u64(73);
    assert_eq!(rollout(&Countdown::new(3), false, &mut rng), 1.0);
    assert_eq!(rollout(&Countdown::new(4), false, &mut rng), 1.0);
}

#[test]
fn rollout_sum_accumulates_rather_than_averages() {
    let mut rng = StdRng::seed_from_u64(74);
    let serial = rollout_sum(&Countdown::new(3), 5, true, false, &mut rng);
    assert_eq!(serial, 5.0);

    // The parallel path must produce the same total for a deterministic
    // game, whatever the seeds of the per-worker generators.
    let parallel = rollout_sum(&Countdown::new(4), 5, true, true, &mut rng);
    assert_eq!(parallel, -5.0);
}
