//! Search world contract trait.

/// A state produced from another by one unit-cost action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor<S> {
    pub state: S,
    /// Human-readable action label, e.g. `DOWN` or `0 missionary(ies) and 2 cannibal(s) -> right`.
    pub action: String,
}

/// Trait for state spaces the A* solver can walk.
///
/// # Contract
///
/// - `key` is canonical: two states with equal keys are the same state.
/// - `successors` is deterministic: same state, same successors, same order.
/// - `heuristic` never overestimates the remaining number of actions when
///   optimal paths are expected.
pub trait SearchWorld {
    type State: Clone;

    /// Stable identifier used in logs and digests.
    fn world_id(&self) -> &str;

    fn key(&self, state: &Self::State) -> String;

    fn heuristic(&self, state: &Self::State) -> u64;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State>>;

    /// Short description for step messages. Defaults to the key.
    fn describe(&self, state: &Self::State) -> String {
        self.key(state)
    }
}
