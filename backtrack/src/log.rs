//! Events emitted by [`crate::transition`] and the append-only run log.

use serde_json::json;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;

/// One observable thing that happened during a transition.
///
/// Coordinates are zero-based; messages print them one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueensEvent {
    Initialized { n: usize },
    Trying { row: usize, col: usize },
    Placed { row: usize, col: usize },
    Conflict {
        row: usize,
        col: usize,
        /// First earlier queen attacking the trial cell.
        attacker: (usize, usize),
    },
    /// The queen at `(row, col)` is removed; the next try is `col + 1`.
    Backtracked { row: usize, col: usize },
    Solved,
    NoSolution,
}

impl QueensEvent {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::Trying { .. } => "trying",
            Self::Placed { .. } => "placed",
            Self::Conflict { .. } => "conflict",
            Self::Backtracked { .. } => "backtracked",
            Self::Solved => "solved",
            Self::NoSolution => "no_solution",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Solved | Self::NoSolution)
    }

    #[must_use]
    pub fn message(&self) -> String {
        match *self {
            Self::Initialized { n } => format!("Initialized {n}x{n} board"),
            Self::Trying { row, col } => {
                format!("Trying position (Row {}, Col {})", row + 1, col + 1)
            }
            Self::Placed { row, col } => {
                format!("Placed queen at (Row {}, Col {})", row + 1, col + 1)
            }
            Self::Conflict { row, col, attacker } => format!(
                "Conflict at (Row {}, Col {}): attacked by queen at (Row {}, Col {})",
                row + 1,
                col + 1,
                attacker.0 + 1,
                attacker.1 + 1
            ),
            Self::Backtracked { row, col } => {
                format!("Backtracking from (Row {}, Col {})", row + 1, col + 1)
            }
            Self::Solved => "Solution found!".to_string(),
            Self::NoSolution => "No solution found".to_string(),
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut v = json!({
            "event": self.as_str(),
            "message": self.message(),
        });
        match *self {
            Self::Initialized { n } => v["n"] = json!(n),
            Self::Trying { row, col }
            | Self::Placed { row, col }
            | Self::Backtracked { row, col } => {
                v["row"] = json!(row);
                v["col"] = json!(col);
            }
            Self::Conflict { row, col, attacker } => {
                v["row"] = json!(row);
                v["col"] = json!(col);
                v["attacker"] = json!([attacker.0, attacker.1]);
            }
            Self::Solved | Self::NoSolution => {}
        }
        v
    }
}

/// Every event of a run in order. Undo truncates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueensLog {
    pub entries: Vec<QueensEvent>,
}

impl QueensLog {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&QueensEvent> {
        self.entries.last()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(QueensEvent::message).collect()
    }

    #[must_use]
    pub fn count(&self, kind: &str) -> usize {
        self.entries.iter().filter(|e| e.as_str() == kind).count()
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "entries": self.entries.iter().map(QueensEvent::to_json_value).collect::<Vec<_>>(),
        })
    }

    /// # Errors
    ///
    /// Propagates [`CanonError`]; not expected for values built here.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// See [`Self::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::QueensLog,
            &self.to_canonical_json_bytes()?,
        ))
    }
}
