//! `EightPuzzle`: sliding-tile search toward a configurable goal board.
//!
//! Actions are named for the direction the blank moves. Unsolvable starts
//! are not rejected; the search exhausts the reachable half of the state
//! space and reports failure.

use rand::Rng;
use waypoint_kernel::puzzle::{random_solvable_for, Board, Heuristic, GOAL};
use waypoint_search::{AStarSolver, SearchPolicy, SearchWorld, Successor};

use crate::error::HarnessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EightPuzzle {
    goal: Board,
    heuristic: Heuristic,
}

impl Default for EightPuzzle {
    fn default() -> Self {
        Self::new(GOAL, Heuristic::default())
    }
}

impl EightPuzzle {
    #[must_use]
    pub fn new(goal: Board, heuristic: Heuristic) -> Self {
        Self { goal, heuristic }
    }

    #[must_use]
    pub fn goal(&self) -> &Board {
        &self.goal
    }

    #[must_use]
    pub fn heuristic_kind(&self) -> Heuristic {
        self.heuristic
    }

    /// Same inversion parity as the goal.
    #[must_use]
    pub fn is_solvable_from(&self, start: &Board) -> bool {
        start.is_solvable_for(&self.goal)
    }

    /// A random start that can reach this world's goal.
    pub fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        random_solvable_for(rng, &self.goal)
    }

    /// A solver seeded with `start`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Search`] for an invalid policy.
    pub fn solver(self, start: Board, policy: SearchPolicy) -> Result<AStarSolver<Self>, HarnessError> {
        tracing::debug!(
            start = %start.key(),
            goal = %self.goal.key(),
            heuristic = self.heuristic.as_str(),
            "eight puzzle solver"
        );
        Ok(AStarSolver::new(self, start, policy)?)
    }

    /// Parse both boards from text, then build a solver.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Board`] for a malformed board, or see [`Self::solver`].
    pub fn solver_from_text(
        start: &str,
        goal: &str,
        heuristic: Heuristic,
        policy: SearchPolicy,
    ) -> Result<AStarSolver<Self>, HarnessError> {
        let start: Board = start.parse()?;
        let goal: Board = goal.parse()?;
        Self::new(goal, heuristic).solver(start, policy)
    }
}

impl SearchWorld for EightPuzzle {
    type State = Board;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "eight_puzzle"
    }

    fn key(&self, state: &Board) -> String {
        state.key()
    }

    fn heuristic(&self, state: &Board) -> u64 {
        self.heuristic.evaluate(state, &self.goal)
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Board) -> Vec<Successor<Board>> {
        state
            .neighbors()
            .into_iter()
            .map(|(mv, board)| Successor {
                state: board,
                action: mv.as_str().to_string(),
            })
            .collect()
    }

    fn describe(&self, state: &Board) -> String {
        format!("[{}]", state.key())
    }
}
