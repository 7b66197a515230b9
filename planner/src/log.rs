//! Planner step log.
//!
//! Each entry records what the planner did, why (as a message), and full
//! snapshots of the stack (top first), world, and plan after the step.

use waypoint_kernel::blocks::{Operator, Predicate};
use waypoint_kernel::proof::canon::CanonError;
use waypoint_kernel::proof::hash::{canonical_json_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;

/// What one planner step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanAction {
    /// Every member of the conjunction holds; popped.
    ConjunctionSatisfied,
    /// Unsatisfied members pushed.
    ConjunctionDecomposed,
    /// Goal already holds; popped.
    GoalSatisfied,
    /// Operator and its preconditions pushed for a goal.
    OperatorSelected,
    /// Goal re-pushed under subgoals.
    SubgoalsPushed,
    /// `CLEAR(X)` added to the world.
    ClearInferred,
    /// No rule achieves the goal; dropped.
    NoOperator,
    /// Goal equals the one just decomposed (regression only); dropped.
    AlreadyDecomposed,
    /// Operator re-pushed under its unmet preconditions.
    PreconditionsPending,
    /// Operator applied and appended to the plan.
    OperatorApplied,
    /// Operator would add nothing outstanding; dropped.
    SkippedRedundant,
    /// Operator reached in regression mode; nothing is applied.
    OperatorRegressed,
    /// Stack empty and the run succeeded.
    Complete,
    /// Stack empty but some goal does not hold.
    GoalsUnmet,
    /// Step ceiling reached.
    StepLimit,
}

impl PlanAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConjunctionSatisfied => "conjunction_satisfied",
            Self::ConjunctionDecomposed => "conjunction_decomposed",
            Self::GoalSatisfied => "goal_satisfied",
            Self::OperatorSelected => "operator_selected",
            Self::SubgoalsPushed => "subgoals_pushed",
            Self::ClearInferred => "clear_inferred",
            Self::NoOperator => "no_operator",
            Self::AlreadyDecomposed => "already_decomposed",
            Self::PreconditionsPending => "preconditions_pending",
            Self::OperatorApplied => "operator_applied",
            Self::SkippedRedundant => "skipped_redundant",
            Self::OperatorRegressed => "operator_regressed",
            Self::Complete => "complete",
            Self::GoalsUnmet => "goals_unmet",
            Self::StepLimit => "step_limit",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::GoalsUnmet | Self::StepLimit)
    }
}

/// One log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// Stack items processed so far, this one included. Terminal entries
    /// repeat the final count.
    pub step: u64,
    pub action: PlanAction,
    pub message: String,
    pub goal: Option<Predicate>,
    pub operator: Option<Operator>,
    /// Stack after the step, top first.
    pub stack: Vec<String>,
    pub world: Vec<String>,
    pub plan: Vec<String>,
}

impl PlanStep {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "action": self.action.as_str(),
            "goal": self.goal.as_ref().map(ToString::to_string),
            "message": self.message,
            "operator": self.operator.as_ref().map(ToString::to_string),
            "plan": self.plan,
            "stack": self.stack,
            "step": self.step,
            "world": self.world,
        })
    }
}

/// The ordered entries of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanLog {
    pub entries: Vec<PlanStep>,
}

impl PlanLog {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Array(self.entries.iter().map(PlanStep::to_json_value).collect())
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        waypoint_kernel::proof::canon::canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest under [`HashDomain::PlanLog`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        canonical_json_hash(HashDomain::PlanLog, &self.to_json_value())
    }

    #[must_use]
    pub fn last(&self) -> Option<&PlanStep> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with the given action.
    pub fn with_action(&self, action: PlanAction) -> impl Iterator<Item = &PlanStep> {
        self.entries.iter().filter(move |e| e.action == action)
    }
}

/// Digest of an operator sequence under [`HashDomain::Plan`].
///
/// # Errors
///
/// Returns [`CanonError`] if serialization fails.
pub fn plan_digest(plan: &[Operator]) -> Result<ContentHash, CanonError> {
    let value = serde_json::Value::Array(
        plan.iter()
            .map(|op| serde_json::Value::String(op.to_string()))
            .collect(),
    );
    canonical_json_hash(HashDomain::Plan, &value)
}
