//! Admissible 8-puzzle heuristics, measured against any goal board.

use std::fmt;

use super::board::{Board, SIDE};

/// Heuristic choice for the 8-puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Tiles (blank excluded) not on their goal cell.
    MisplacedTiles,
    /// Sum of tile distances to their goal cells.
    #[default]
    Manhattan,
}

impl Heuristic {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MisplacedTiles => "misplaced",
            Self::Manhattan => "manhattan",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "misplaced" | "misplaced_tiles" | "misplaced-tiles" => Some(Self::MisplacedTiles),
            "manhattan" => Some(Self::Manhattan),
            _ => None,
        }
    }

    #[must_use]
    pub fn evaluate(self, board: &Board, goal: &Board) -> u64 {
        match self {
            Self::MisplacedTiles => misplaced_tiles(board, goal),
            Self::Manhattan => manhattan(board, goal),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn misplaced_tiles(board: &Board, goal: &Board) -> u64 {
    let n = board
        .tiles()
        .iter()
        .zip(goal.tiles())
        .filter(|(&b, &g)| b != 0 && b != g)
        .count();
    n as u64
}

fn manhattan(board: &Board, goal: &Board) -> u64 {
    let mut target = [(0usize, 0usize); SIDE * SIDE];
    for (i, &g) in goal.tiles().iter().enumerate() {
        target[usize::from(g)] = (i / SIDE, i % SIDE);
    }
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|(_, &t)| t != 0)
        .map(|(i, &t)| {
            let (gr, gc) = target[usize::from(t)];
            ((i / SIDE).abs_diff(gr) + (i % SIDE).abs_diff(gc)) as u64
        })
        .sum()
}
