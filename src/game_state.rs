//! Traits defining the game state contract consumed by the search engine.
//!
//! The engine never inspects game rules directly: legality, win detection and
//! board encoding all live behind [`GameState`]. The engine only ever applies
//! actions it obtained from `possible_actions`, so an implementation may treat
//! an illegal application as a contract breach and panic.

use std::fmt::Debug;

/// Trait for actions that can be taken in a game.
///
/// The `id` is the stable identifier the engine uses for RAVE bookkeeping,
/// cross-move tree reuse and merge alignment. Two actions that represent the
/// same move in the game must report the same id.
pub trait Action: Clone + Debug + PartialEq + Send + Sync {
    /// Returns a unique identifier for this action.
    fn id(&self) -> usize;
}

/// Trait defining the game state interface required by the search engine.
///
/// A `GameState` is an opaque snapshot of one position plus the action that
/// produced it. The engine always simulates against clones, never the
/// caller's live state.
pub trait GameState: Clone + Send + Sync {
    /// The type of actions that can be taken in this game.
    type Action: Action;

    /// Returns all legal actions from this state.
    ///
    /// The returned list must be empty if and only if the state is terminal,
    /// and must be enumerated in a deterministic order for a given state:
    /// the parallel coordinator aligns root children positionally when it
    /// merges trees, and a nondeterministic enumeration is a fatal
    /// configuration bug.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Applies an action, returning the successor state.
    ///
    /// Must be pure (the original state is not modified) and deterministic.
    /// The action must be one returned by `possible_actions` on this state;
    /// implementations should panic on an illegal application rather than
    /// continue with a corrupted position.
    fn apply(&self, action: &Self::Action) -> Self;

    /// Returns true if this state is terminal (game over).
    fn is_terminal(&self) -> bool;

    /// Returns the terminal value of this state.
    ///
    /// Only meaningful once `is_terminal` returns true. The value is taken
    /// from the perspective of the player who made `last_action`: positive
    /// means the move that reached this state was good for its mover. With
    /// minimax mode active the engine alternates the sign level by level
    /// during backpropagation, so a single scalar is enough for both sides.
    fn reward(&self) -> f64;

    /// Returns the action that produced this state, or `None` for an
    /// initial state that was not reached by a move.
    fn last_action(&self) -> Option<Self::Action>;

    /// Game-semantic equality, used to match a root child when the real
    /// game advances and the engine tries to reuse the subtree.
    ///
    /// This is position identity, not object identity: two states reached
    /// through different move orders may compare equal.
    fn same_state(&self, other: &Self) -> bool;
}
