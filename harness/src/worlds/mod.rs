//! Concrete search worlds.

pub mod eight_puzzle;
pub mod river_crossing;

pub use eight_puzzle::EightPuzzle;
pub use river_crossing::RiverCrossing;
