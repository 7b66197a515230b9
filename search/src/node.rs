//! Arena search nodes and the frontier ordering key.

/// A node in the solver's arena.
///
/// Nodes are never removed; `parent_id` indexes the same arena, so path
/// reconstruction is a walk over ids rather than references.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// Index into the arena; also the creation order.
    pub node_id: u64,
    /// Parent node id (`None` for the root).
    pub parent_id: Option<u64>,
    pub state: S,
    /// Canonical state key.
    pub key: String,
    /// Path length from the root.
    pub depth: u32,
    /// Cost so far (one per action).
    pub g_cost: u64,
    /// Heuristic estimate.
    pub h_cost: u64,
    /// Action that produced this node from its parent.
    pub action: Option<String>,
}

impl<S> SearchNode<S> {
    /// `f = g + h`, the frontier ordering cost.
    #[must_use]
    pub fn f_cost(&self) -> u64 {
        self.g_cost.saturating_add(self.h_cost)
    }

    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            f_cost: self.f_cost(),
            depth: self.depth,
            creation_order: self.node_id,
        }
    }
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older `creation_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrontierKey {
    pub f_cost: u64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
