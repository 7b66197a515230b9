//! Property tests for the 8-puzzle: scrambles built by random walks from the
//! goal bound the optimal length from above, both heuristics agree on it,
//! and each returned path is a legal move chain.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use waypoint_harness::worlds::EightPuzzle;
use waypoint_kernel::puzzle::{random_solvable, Board, Heuristic, Move, GOAL};
use waypoint_search::SearchPolicy;

fn walk(choices: &[usize]) -> Board {
    choices.iter().fold(GOAL, |board, &pick| {
        let next = board.neighbors();
        next[pick % next.len()].1
    })
}

fn optimal(start: Board, heuristic: Heuristic) -> (usize, Vec<Board>) {
    let mut solver = EightPuzzle::new(GOAL, heuristic)
        .solver(start, SearchPolicy::default())
        .expect("valid policy");
    let report = solver.solve();
    assert!(report.success, "walked boards are always solvable");
    let moves = report.moves().expect("moves");
    (moves, report.path.iter().map(|p| p.state).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn walk_length_bounds_the_optimum(choices in proptest::collection::vec(0usize..4, 0..18)) {
        let start = walk(&choices);
        let (manhattan, path) = optimal(start, Heuristic::Manhattan);
        let (misplaced, _) = optimal(start, Heuristic::MisplacedTiles);

        prop_assert!(manhattan <= choices.len());
        prop_assert_eq!(manhattan, misplaced);
        prop_assert_eq!(manhattan % 2, choices.len() % 2);
        prop_assert!(Heuristic::Manhattan.evaluate(&start, &GOAL) <= manhattan as u64);
        prop_assert!(Heuristic::MisplacedTiles.evaluate(&start, &GOAL) <= manhattan as u64);

        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&GOAL));
        for pair in path.windows(2) {
            let legal = Move::ALL.iter().any(|&mv| pair[0].slide(mv) == Some(pair[1]));
            prop_assert!(legal, "{} -> {} is not one slide", pair[0].key(), pair[1].key());
        }
    }

    #[test]
    fn seeded_scrambles_are_solvable(seed in any::<u64>()) {
        let board = random_solvable(&mut StdRng::seed_from_u64(seed));
        prop_assert!(board.is_solvable());
        prop_assert!(EightPuzzle::default().is_solvable_from(&board));
        let again = random_solvable(&mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(board, again);
    }
}
