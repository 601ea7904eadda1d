//! Small numeric helpers shared by the selection policies.

/// Average value of a node, 0.0 before the first visit.
pub fn mean_value(value: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    value / visits as f64
}

/// Exploration term of UCB1: `c * sqrt(ln(parent_visits) / child_visits)`.
///
/// Infinite for an unvisited child, so forced exploration falls out of the
/// formula even when callers do not special-case `child_visits == 0`.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    // ln(0) would be -inf; a parent is always visited before its children
    // are selected through, but clamp anyway.
    let parent_log = (parent_visits.max(1) as f64).ln();
    exploration_constant * (parent_log / child_visits as f64).sqrt()
}

/// Full UCB1 score for a child given its signed mean value.
pub fn ucb1_score(
    signed_mean: f64,
    parent_visits: u64,
    child_visits: u64,
    exploration_constant: f64,
) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    signed_mean + exploration_term(parent_visits, child_visits, exploration_constant)
}

/// RAVE blending weight: approaches 1 with no direct evidence and decays
/// towards 0 as direct visits accumulate. `bias` is the equivalence
/// parameter controlling how quickly AMAF evidence is discounted.
pub fn rave_beta(amaf_visits: u64, child_visits: u64, bias: f64) -> f64 {
    let m = amaf_visits as f64;
    let n = child_visits as f64;
    m / (m + n + 4.0 * bias * bias * m * n)
}
