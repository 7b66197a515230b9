//! Waypoint Harness: concrete worlds and drivers for the engines.
//!
//! - [`worlds`] -- `EightPuzzle` and `RiverCrossing` as [`waypoint_search::SearchWorld`]s
//! - [`river_game`] -- the user-directed river crossing with win and loss
//! - [`runner`] -- the [`runner::Stepper`] contract over all engines and a
//!   cancellable [`runner::AutoRunner`]
//! - [`transcript`] -- `key=value` digests for determinism checks
//!
//! The harness holds no search or planning logic of its own.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod river_game;
pub mod runner;
pub mod transcript;
pub mod worlds;

pub use error::HarnessError;
