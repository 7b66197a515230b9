//! Search policy.

use crate::error::SearchError;

/// Default number of open-list entries in a snapshot.
pub const DEFAULT_OPEN_SNAPSHOT_LIMIT: usize = 10;

/// Budget and display configuration for one solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on frontier pops. `None` runs until the goal or exhaustion;
    /// callers exploring unsolvable 8-puzzles should set one.
    pub max_expansions: Option<u64>,
    /// Entries returned by `open_snapshot`.
    pub open_snapshot_limit: usize,
}

impl SearchPolicy {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget or a
    /// zero snapshot limit.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.open_snapshot_limit == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "open_snapshot_limit must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Policy with an expansion budget and default snapshot size.
    #[must_use]
    pub fn with_budget(max_expansions: u64) -> Self {
        Self {
            max_expansions: Some(max_expansions),
            ..Self::default()
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: None,
            open_snapshot_limit: DEFAULT_OPEN_SNAPSHOT_LIMIT,
        }
    }
}
