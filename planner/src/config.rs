//! Planner configuration.

use std::collections::BTreeSet;

use waypoint_kernel::blocks::scenario::Scenario;
use waypoint_kernel::blocks::{parse_predicates, Predicate, World};

use crate::error::PlannerError;

/// Step ceiling used when none is given.
pub const DEFAULT_MAX_STEPS: u64 = 2000;

/// How the planner treats the world while decomposing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlannerMode {
    /// Apply operators to a working world as they become applicable.
    #[default]
    Forward,
    /// Decompose against the fixed initial world; never apply anything.
    Regression,
}

impl PlannerMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Regression => "regression",
        }
    }
}

/// Everything one planner run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub initial: World,
    pub goals: Vec<Predicate>,
    /// Declared blocks. Empty means "whatever the initial world names".
    pub blocks: BTreeSet<String>,
    pub mode: PlannerMode,
    pub max_steps: u64,
}

impl PlannerConfig {
    #[must_use]
    pub fn new(initial: World, goals: Vec<Predicate>) -> Self {
        Self {
            initial,
            goals,
            blocks: BTreeSet::new(),
            mode: PlannerMode::default(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    #[must_use]
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.initial.clone(), scenario.goals.clone())
    }

    /// Parse newline-separated predicate lists for the initial world and goals.
    ///
    /// # Errors
    ///
    /// [`PlannerError::Parse`] on the first malformed line.
    pub fn from_text(initial: &str, goals: &str) -> Result<Self, PlannerError> {
        let initial: World = parse_predicates(initial)?.into_iter().collect();
        Ok(Self::new(initial, parse_predicates(goals)?))
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PlannerMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    #[must_use]
    pub fn with_blocks<I, S>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks = blocks.into_iter().map(Into::into).collect();
        self
    }

    /// The declared block set, or the initial world's blocks if none.
    #[must_use]
    pub fn effective_blocks(&self) -> BTreeSet<String> {
        if self.blocks.is_empty() {
            self.initial.blocks()
        } else {
            self.blocks.clone()
        }
    }

    /// # Errors
    ///
    /// Returns a [`PlannerError`] for empty goals, a zero ceiling, predicates
    /// naming undeclared blocks, or an initial world that holds a block while
    /// the arm is empty or holds more than one block.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.goals.is_empty() {
            return Err(PlannerError::EmptyGoals);
        }
        if self.max_steps == 0 {
            return Err(PlannerError::ZeroStepCeiling);
        }
        let blocks = self.effective_blocks();
        for p in self.initial.iter().chain(&self.goals) {
            if let Some(unknown) = p.args().into_iter().find(|b| !blocks.contains(*b)) {
                return Err(PlannerError::UnknownBlock {
                    block: unknown.to_string(),
                    predicate: p.to_string(),
                });
            }
        }
        let held: Vec<&Predicate> = self
            .initial
            .iter()
            .filter(|p| matches!(p, Predicate::Holding(_)))
            .collect();
        if held.len() > 1 {
            return Err(PlannerError::InconsistentWorld {
                detail: format!("arm holds {} blocks", held.len()),
            });
        }
        if let Some(h) = held.first() {
            if self.initial.arm_empty() {
                return Err(PlannerError::InconsistentWorld {
                    detail: format!("{h} and ARMEMPTY both hold"),
                });
            }
        }
        Ok(())
    }
}
