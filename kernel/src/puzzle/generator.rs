//! Random solvable boards.

use rand::Rng;

use super::board::{Board, CELLS};

/// Shuffle `0..=8` with Fisher-Yates until the result can reach `goal`.
///
/// Half of all permutations share the goal's parity, so the expected number
/// of draws is two.
pub fn random_solvable_for<R: Rng + ?Sized>(rng: &mut R, goal: &Board) -> Board {
    loop {
        let mut tiles: [u8; CELLS] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        for i in (1..CELLS).rev() {
            let j = rng.gen_range(0..=i);
            tiles.swap(i, j);
        }
        if let Ok(board) = Board::from_tiles(&tiles) {
            if board.is_solvable_for(goal) {
                return board;
            }
        }
    }
}

/// A random board solvable against the standard goal.
pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R) -> Board {
    random_solvable_for(rng, &super::board::GOAL)
}
