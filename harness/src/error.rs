//! Construction failures surfaced by the harness.

use std::fmt;

use waypoint_backtrack::QueensError;
use waypoint_kernel::proof::canon::CanonError;
use waypoint_kernel::puzzle::BoardError;
use waypoint_kernel::river::RiverConfigError;
use waypoint_planner::PlannerError;
use waypoint_search::SearchError;

/// Any error raised while building a world, engine, or transcript.
#[derive(Debug)]
pub enum HarnessError {
    Board(BoardError),
    River(RiverConfigError),
    Planner(PlannerError),
    Queens(QueensError),
    Search(SearchError),
    /// A log could not be canonicalized for digesting.
    Canon(CanonError),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(e) => write!(f, "invalid board: {e}"),
            Self::River(e) => write!(f, "invalid river config: {e}"),
            Self::Planner(e) => write!(f, "invalid planner config: {e}"),
            Self::Queens(e) => write!(f, "invalid queens config: {e}"),
            Self::Search(e) => write!(f, "invalid search policy: {e}"),
            Self::Canon(e) => write!(f, "canonicalization failed: {e}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board(e) => Some(e),
            Self::River(e) => Some(e),
            Self::Planner(e) => Some(e),
            Self::Queens(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
        }
    }
}

impl From<BoardError> for HarnessError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

impl From<RiverConfigError> for HarnessError {
    fn from(e: RiverConfigError) -> Self {
        Self::River(e)
    }
}

impl From<PlannerError> for HarnessError {
    fn from(e: PlannerError) -> Self {
        Self::Planner(e)
    }
}

impl From<QueensError> for HarnessError {
    fn from(e: QueensError) -> Self {
        Self::Queens(e)
    }
}

impl From<SearchError> for HarnessError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for HarnessError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}
