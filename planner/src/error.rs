//! Typed planner errors.
//!
//! Only construction can fail. A plan that cannot be found (unmet goals,
//! step ceiling) is a [`crate::PlanOutcome`], not an error.

use waypoint_kernel::blocks::PredicateParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The goal conjunction is empty.
    EmptyGoals,
    /// `max_steps` is zero.
    ZeroStepCeiling,
    /// A predicate names a block outside the declared block set.
    UnknownBlock { block: String, predicate: String },
    /// The initial world cannot describe a real arm.
    InconsistentWorld { detail: String },
    /// Predicate text failed to parse.
    Parse(PredicateParseError),
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGoals => f.write_str("goal conjunction is empty"),
            Self::ZeroStepCeiling => f.write_str("max_steps must be at least 1"),
            Self::UnknownBlock { block, predicate } => {
                write!(f, "{predicate} names unknown block {block:?}")
            }
            Self::InconsistentWorld { detail } => write!(f, "inconsistent initial world: {detail}"),
            Self::Parse(e) => write!(f, "predicate parse error: {e}"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PredicateParseError> for PlannerError {
    fn from(e: PredicateParseError) -> Self {
        Self::Parse(e)
    }
}
