//! `SearchLog`: the explainable A* step log.
//!
//! One [`ExpandEvent`] per frontier pop, in pop order, each carrying the
//! human-readable message a viewer shows and the fate of every successor.
//! The log is the determinism surface: two runs over the same input produce
//! byte-identical canonical JSON.

use waypoint_kernel::proof::canon::CanonError;
use waypoint_kernel::proof::hash::{canonical_json_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;

/// What happened to one generated successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessorOutcome {
    /// New open entry.
    Inserted { node_id: u64 },
    /// Cheaper path to a state already open; the old entry is superseded.
    Replaced { node_id: u64, previous_g: u64 },
    /// State already expanded; nodes are never reopened.
    SkippedClosed,
    /// An open entry with `g <= candidate g` exists.
    SkippedNotImproved { existing_g: u64 },
}

/// One successor considered during an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorRecord {
    pub key: String,
    pub action: String,
    pub g_cost: u64,
    pub h_cost: u64,
    pub outcome: SuccessorOutcome,
}

/// One frontier pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEvent {
    /// 1-based pop count.
    pub step: u64,
    pub node_id: u64,
    pub key: String,
    pub g_cost: u64,
    pub h_cost: u64,
    pub depth: u32,
    /// Action that produced the popped node.
    pub action: Option<String>,
    /// True when the popped node was a goal; `successors` is then empty.
    pub goal: bool,
    pub successors: Vec<SuccessorRecord>,
    /// Open-list size after the pop and all successor updates.
    pub open_size: usize,
    pub closed_size: usize,
    pub message: String,
}

impl ExpandEvent {
    #[must_use]
    pub fn f_cost(&self) -> u64 {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// Successors that entered or improved the open list.
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.successors
            .iter()
            .filter(|s| {
                matches!(
                    s.outcome,
                    SuccessorOutcome::Inserted { .. } | SuccessorOutcome::Replaced { .. }
                )
            })
            .count()
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// A goal node was popped; `moves` is its path length.
    GoalReached { node_id: u64, moves: u32 },
    /// Open list emptied without a goal.
    FrontierExhausted,
    /// `max_expansions` pops happened without a goal.
    ExpansionBudgetExceeded { max_expansions: u64 },
}

impl TerminationReason {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::GoalReached { .. })
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::GoalReached { moves, .. } => {
                format!("Goal state reached! Solution has {moves} moves")
            }
            Self::FrontierExhausted => "No solution exists".to_string(),
            Self::ExpansionBudgetExceeded { max_expansions } => {
                format!("Expansion budget of {max_expansions} exhausted before reaching the goal")
            }
        }
    }
}

/// The complete step log of one solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLog {
    pub world_id: String,
    pub start_key: String,
    pub events: Vec<ExpandEvent>,
    pub termination: Option<TerminationReason>,
}

impl SearchLog {
    #[must_use]
    pub fn new(world_id: &str, start_key: &str) -> Self {
        Self {
            world_id: world_id.to_string(),
            start_key: start_key.to_string(),
            events: Vec::new(),
            termination: None,
        }
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        waypoint_kernel::proof::canon::canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest under [`HashDomain::SearchLog`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::SearchLog, &self.to_json_value())
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "start_key": self.start_key,
            "termination": self.termination.as_ref().map(termination_to_json),
            "world_id": self.world_id,
        })
    }
}

fn event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "action": e.action,
        "closed_size": e.closed_size,
        "depth": e.depth,
        "g": e.g_cost,
        "goal": e.goal,
        "h": e.h_cost,
        "key": e.key,
        "message": e.message,
        "node_id": e.node_id,
        "open_size": e.open_size,
        "step": e.step,
        "successors": e.successors.iter().map(successor_to_json).collect::<Vec<_>>(),
    })
}

fn successor_to_json(s: &SuccessorRecord) -> serde_json::Value {
    serde_json::json!({
        "action": s.action,
        "g": s.g_cost,
        "h": s.h_cost,
        "key": s.key,
        "outcome": outcome_to_json(&s.outcome),
    })
}

fn outcome_to_json(o: &SuccessorOutcome) -> serde_json::Value {
    match o {
        SuccessorOutcome::Inserted { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "inserted"})
        }
        SuccessorOutcome::Replaced {
            node_id,
            previous_g,
        } => {
            serde_json::json!({"node_id": node_id, "previous_g": previous_g, "type": "replaced"})
        }
        SuccessorOutcome::SkippedClosed => serde_json::json!({"type": "skipped_closed"}),
        SuccessorOutcome::SkippedNotImproved { existing_g } => {
            serde_json::json!({"existing_g": existing_g, "type": "skipped_not_improved"})
        }
    }
}

fn termination_to_json(r: &TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::GoalReached { node_id, moves } => {
            serde_json::json!({"moves": moves, "node_id": node_id, "type": "goal_reached"})
        }
        TerminationReason::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReason::ExpansionBudgetExceeded { max_expansions } => {
            serde_json::json!({"max_expansions": max_expansions, "type": "expansion_budget_exceeded"})
        }
    }
}
