//! Goal-stack items.

use std::fmt;

use waypoint_kernel::blocks::{Operator, Predicate};

/// One entry on the goal stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    /// A conjunction re-checked after its members are processed.
    Conjunction(Vec<Predicate>),
    /// A single goal.
    Goal(Predicate),
    /// An operator chosen to establish `purpose`, waiting on its preconditions.
    Operator { op: Operator, purpose: Predicate },
}

impl StackItem {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Conjunction(_) => "conjunction",
            Self::Goal(_) => "goal",
            Self::Operator { .. } => "operator",
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::Conjunction(goals) => serde_json::json!({
                "goals": goals.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "type": "conjunction",
            }),
            Self::Goal(g) => serde_json::json!({"goal": g.to_string(), "type": "goal"}),
            Self::Operator { op, purpose } => serde_json::json!({
                "operator": op.to_string(),
                "purpose": purpose.to_string(),
                "type": "operator",
            }),
        }
    }
}

impl fmt::Display for StackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conjunction(goals) => {
                let parts: Vec<String> = goals.iter().map(ToString::to_string).collect();
                write!(f, "AND[{}]", parts.join(", "))
            }
            Self::Goal(g) => write!(f, "{g}"),
            Self::Operator { op, .. } => write!(f, "OP {op}"),
        }
    }
}
