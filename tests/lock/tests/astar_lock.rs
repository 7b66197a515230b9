//! A* lock tests: optimality, determinism, and the non-reopening closed set.

use std::collections::BTreeSet;

use waypoint_harness::worlds::{EightPuzzle, RiverCrossing};
use waypoint_kernel::puzzle::{Board, Heuristic, GOAL};
use waypoint_search::{AStarSolver, SearchLog, SearchPolicy, SuccessorOutcome, TerminationReason};

fn board(tiles: &str) -> Board {
    tiles.parse().expect("valid board")
}

fn puzzle_solver(start: &str, heuristic: Heuristic) -> AStarSolver<EightPuzzle> {
    EightPuzzle::new(GOAL, heuristic)
        .solver(board(start), SearchPolicy::default())
        .expect("valid policy")
}

// ACCEPTANCE: ASTAR-OPTIMAL-EASY
#[test]
fn two_move_puzzle_in_three_pops() {
    let mut solver = puzzle_solver("1,2,3,4,0,6,7,5,8", Heuristic::Manhattan);
    let report = solver.solve();
    assert!(report.success);
    assert_eq!(report.moves(), Some(2));
    assert_eq!(report.nodes_expanded, 3);
    assert_eq!(
        report.termination,
        TerminationReason::GoalReached { node_id: report.path[2].node_id, moves: 2 }
    );
    let keys: Vec<&str> = report.path.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["1,2,3,4,0,6,7,5,8", "1,2,3,4,5,6,7,0,8", "1,2,3,4,5,6,7,8,0"]
    );
    let stats = solver.stats();
    assert!(stats.completed);
    assert_eq!(stats.solution_length, Some(2));
}

// ACCEPTANCE: ASTAR-OPTIMAL-HARD
#[test]
fn hardest_class_instance_takes_thirty_one_moves() {
    let mut solver = puzzle_solver("8,6,7,2,5,4,3,0,1", Heuristic::Manhattan);
    let report = solver.solve();
    assert!(report.success);
    assert_eq!(report.moves(), Some(31));
    let last = report.path.last().expect("non-empty path");
    assert_eq!(last.state, GOAL);
}

// ACCEPTANCE: ASTAR-HEURISTIC-AGREEMENT
#[test]
fn misplaced_tiles_finds_same_length_with_more_work() {
    let start = "4,1,3,7,2,6,0,5,8";
    let mut manhattan = puzzle_solver(start, Heuristic::Manhattan);
    let mut misplaced = puzzle_solver(start, Heuristic::MisplacedTiles);
    let a = manhattan.solve();
    let (a_moves, a_expanded) = (a.moves(), a.nodes_expanded);
    let b = misplaced.solve();
    assert_eq!(a_moves, b.moves());
    assert!(b.nodes_expanded >= a_expanded);
}

// ACCEPTANCE: ASTAR-DETERMINISM
#[test]
fn identical_inputs_give_identical_logs() {
    let run = || {
        let mut solver = puzzle_solver("0,1,3,4,2,5,7,8,6", Heuristic::Manhattan);
        let report = solver.solve();
        (
            report.log.to_canonical_json_bytes().expect("canonical"),
            report.path.iter().map(|p| p.key.clone()).collect::<Vec<_>>(),
        )
    };
    let (log_a, path_a) = run();
    let (log_b, path_b) = run();
    assert_eq!(log_a, log_b);
    assert_eq!(path_a, path_b);

    let river = || {
        let mut solver = RiverCrossing::default()
            .solver(SearchPolicy::default())
            .expect("valid policy");
        solver.solve().log.digest().expect("digest")
    };
    assert_eq!(river(), river());
}

fn assert_closed_monotone(log: &SearchLog) {
    let mut closed = BTreeSet::new();
    for event in &log.events {
        if event.goal {
            continue;
        }
        assert!(
            closed.insert(event.key.clone()),
            "key {} expanded twice",
            event.key
        );
        for succ in &event.successors {
            match succ.outcome {
                SuccessorOutcome::Inserted { .. } | SuccessorOutcome::Replaced { .. } => {
                    assert!(
                        !closed.contains(&succ.key),
                        "closed key {} re-entered the open list",
                        succ.key
                    );
                }
                SuccessorOutcome::SkippedClosed => assert!(closed.contains(&succ.key)),
                SuccessorOutcome::SkippedNotImproved { existing_g } => {
                    assert!(existing_g <= succ.g_cost);
                }
            }
        }
    }
}

// ACCEPTANCE: ASTAR-CLOSED-MONOTONE
#[test]
fn closed_keys_are_never_reopened() {
    let mut solver = puzzle_solver("5,2,8,4,1,7,0,3,6", Heuristic::MisplacedTiles);
    let report = solver.solve();
    assert!(report.success);
    assert_closed_monotone(report.log);

    let mut solver = RiverCrossing::default()
        .solver(SearchPolicy::default())
        .expect("valid policy");
    assert_closed_monotone(solver.solve().log);
    assert_eq!(
        solver.closed_keys().len() as u64 + 1,
        solver.stats().nodes_expanded
    );
}

// ACCEPTANCE: ASTAR-OPEN-SNAPSHOT
#[test]
fn open_snapshot_is_ordered_and_read_only() {
    let mut solver = puzzle_solver("1,2,3,4,0,6,7,5,8", Heuristic::Manhattan);
    assert!(!solver.step().is_done());
    let before = solver.stats();
    let snapshot = solver.open_snapshot();
    assert_eq!(snapshot.len(), 4);
    assert!(snapshot.windows(2).all(|w| w[0].f_cost <= w[1].f_cost));
    assert_eq!(snapshot[0].action.as_deref(), Some("DOWN"));
    assert_eq!(solver.stats(), before);
}

// ACCEPTANCE: ASTAR-EXHAUSTION
#[test]
fn budget_and_exhaustion_are_outcomes_not_errors() {
    let mut solver = EightPuzzle::default()
        .solver(board("2,1,3,4,5,6,7,8,0"), SearchPolicy::with_budget(200))
        .expect("valid policy");
    let report = solver.solve();
    assert!(!report.success);
    assert_eq!(
        report.termination,
        TerminationReason::ExpansionBudgetExceeded { max_expansions: 200 }
    );
    assert!(report.path.is_empty());
    let again = solver.step();
    assert!(again.is_done());
    assert!(!again.is_success());
}
