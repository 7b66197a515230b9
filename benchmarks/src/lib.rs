//! Shared workloads for the waypoint benchmark suites.

use waypoint_harness::worlds::EightPuzzle;
use waypoint_kernel::blocks::{canonical_scenario, sussman_scenario, Scenario};
use waypoint_kernel::puzzle::{Board, BoardError, Heuristic, GOAL};
use waypoint_search::{AStarSolver, SearchPolicy};

/// 8-puzzle starts paired with their optimal solution length.
pub const PUZZLE_STARTS: &[(&str, usize)] = &[
    ("easy", 2),
    ("medium", 22),
    ("hard", 31),
];

/// Tiles for the named entry in [`PUZZLE_STARTS`].
#[must_use]
pub fn puzzle_tiles(name: &str) -> Option<[u8; 9]> {
    match name {
        "easy" => Some([1, 2, 3, 4, 0, 6, 7, 5, 8]),
        "medium" => Some([5, 2, 8, 4, 1, 7, 0, 3, 6]),
        "hard" => Some([8, 6, 7, 2, 5, 4, 3, 0, 1]),
        _ => None,
    }
}

/// A fresh solver for the named start.
///
/// # Panics
///
/// Panics on an unknown name or a malformed board. Benchmark setup failures
/// are fatal.
#[must_use]
pub fn puzzle_solver(name: &str, heuristic: Heuristic) -> AStarSolver<EightPuzzle> {
    let tiles = puzzle_tiles(name).expect("known puzzle start");
    let start = Board::from_tiles(&tiles).expect("valid board");
    EightPuzzle::new(GOAL, heuristic)
        .solver(start, SearchPolicy::default())
        .expect("solver")
}

/// The [`PUZZLE_STARTS`] boards, for heuristic and successor microbenchmarks.
///
/// # Errors
///
/// Propagates [`BoardError`]; not expected for the fixed tiles here.
pub fn sample_boards() -> Result<Vec<Board>, BoardError> {
    PUZZLE_STARTS
        .iter()
        .filter_map(|(name, _)| puzzle_tiles(name))
        .map(|tiles| Board::from_tiles(&tiles))
        .collect()
}

/// Blocks World scenarios by name.
#[must_use]
pub fn scenarios() -> Vec<(&'static str, Scenario)> {
    vec![
        ("canonical", canonical_scenario()),
        ("sussman", sussman_scenario()),
    ]
}

/// Size in bytes of the canonical JSON for a value, for throughput labels.
#[must_use]
pub fn canonical_len(value: &serde_json::Value) -> usize {
    waypoint_kernel::proof::canon::canonical_json_bytes(value).map_or(0, |b| b.len())
}
