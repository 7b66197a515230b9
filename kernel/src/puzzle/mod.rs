//! The 8-puzzle: boards, heuristics, and the seedable random generator.

pub mod board;
pub mod generator;
pub mod heuristic;

pub use board::{Board, BoardError, Move, GOAL};
pub use generator::{random_solvable, random_solvable_for};
pub use heuristic::Heuristic;
