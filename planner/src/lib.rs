//! Waypoint Planner: goal-stack planning over Blocks World.
//!
//! One engine, two modes. [`PlannerMode::Forward`] decomposes goals and
//! applies operators to a working world as their preconditions come true.
//! [`PlannerMode::Regression`] only decomposes, against the fixed initial
//! world, and records the operators in the order they were chosen.
//!
//! Every call to [`GoalStackPlanner::step`] processes one stack item and
//! appends one [`PlanStep`] carrying a message and full snapshots of the
//! stack, world, and plan.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod log;
pub mod planner;
pub mod select;
pub mod stack;

pub use config::{PlannerConfig, PlannerMode, DEFAULT_MAX_STEPS};
pub use error::PlannerError;
pub use log::{plan_digest, PlanAction, PlanLog, PlanStep};
pub use planner::{GoalStackPlanner, PlanOutcome, PlanReport, PlannerStats};
pub use select::{select_forward, select_regression, Selection};
pub use stack::StackItem;
