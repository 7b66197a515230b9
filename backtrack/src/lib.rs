//! Waypoint Backtrack: N-Queens placement as a resumable state machine.
//!
//! Recursion is simulated with an explicit stack of [`Frame`]s. One call to
//! [`transition`] performs one micro-step (try a cell, place or reject it,
//! move past a conflict, or backtrack) and is the only place search logic
//! lives. [`QueensStepper`] drives it one step at a time and keeps a snapshot
//! per step so [`QueensStepper::previous_step`] restores state exactly.
//! Running to completion applies the same step in place and records a single
//! snapshot for the whole run.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod log;
pub mod stepper;

pub use config::QueensConfig;
pub use engine::{advance, transition, Counters, EngineState, EngineStatus, Frame, Phase, TrialCell};
pub use log::{QueensEvent, QueensLog};
pub use stepper::{QueensReport, QueensSnapshot, QueensStats, QueensStepper};
pub use waypoint_kernel::queens::{QueensBoard, QueensError, MAX_BOARD_SIZE};
