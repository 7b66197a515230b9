//! Waypoint Search: deterministic A* over any [`SearchWorld`].
//!
//! This crate depends only on `waypoint_kernel`. Concrete worlds (8-puzzle,
//! river crossing) live in `waypoint_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  <-  waypoint_search  <-  waypoint_harness
//! (value types)        (frontier, A*)       (worlds, runners)
//! ```
//!
//! # Key types
//!
//! - [`AStarSolver`] -- single-step-resumable A* with `step`/`solve`/`stats`
//! - [`SearchWorld`] -- trait for state spaces the solver can walk
//! - [`SearchNode`] -- arena node with a parent id
//! - [`OpenList`] -- binary heap plus best-entry map with lazy deletion
//! - [`SearchLog`] -- explainable expansion log with canonical JSON digest
//! - [`SearchPolicy`] -- expansion budget and snapshot size

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod astar;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod log;
pub mod node;
pub mod policy;

pub use astar::{AStarSolver, OpenEntryView, PathStep, SearchStats, SearchStep, SolveReport};
pub use contract::{SearchWorld, Successor};
pub use error::SearchError;
pub use frontier::OpenList;
pub use log::{ExpandEvent, SearchLog, SuccessorOutcome, SuccessorRecord, TerminationReason};
pub use node::{FrontierKey, SearchNode};
pub use policy::SearchPolicy;
