//! `RiverCrossing`: missionaries and cannibals as a search world.

use waypoint_kernel::river::{RiverConfig, RiverState};
use waypoint_search::{AStarSolver, SearchPolicy, SearchWorld, Successor};

use crate::error::HarnessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiverCrossing {
    config: RiverConfig,
}

impl RiverCrossing {
    /// # Errors
    ///
    /// [`HarnessError::River`] when the totals fail validation.
    pub fn new(config: RiverConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &RiverConfig {
        &self.config
    }

    #[must_use]
    pub fn start(&self) -> RiverState {
        self.config.start()
    }

    /// A solver seeded with everyone on the left bank.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Search`] for an invalid policy.
    pub fn solver(self, policy: SearchPolicy) -> Result<AStarSolver<Self>, HarnessError> {
        let start = self.start();
        Ok(AStarSolver::new(self, start, policy)?)
    }
}

impl SearchWorld for RiverCrossing {
    type State = RiverState;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "river_crossing"
    }

    fn key(&self, state: &RiverState) -> String {
        state.key()
    }

    fn heuristic(&self, state: &RiverState) -> u64 {
        state.heuristic()
    }

    fn is_goal(&self, state: &RiverState) -> bool {
        state.is_goal()
    }

    fn successors(&self, state: &RiverState) -> Vec<Successor<RiverState>> {
        state
            .successors(&self.config)
            .into_iter()
            .map(|(load, next)| Successor {
                state: next,
                action: state.describe_crossing(load),
            })
            .collect()
    }

    fn describe(&self, state: &RiverState) -> String {
        state.to_string()
    }
}
