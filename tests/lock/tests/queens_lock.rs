//! N-Queens step engine lock tests: outcome table, agreement with brute
//! force, and exact undo.

use proptest::prelude::*;
use waypoint_backtrack::{
    transition, EngineState, EngineStatus, QueensConfig, QueensEvent, QueensStepper,
};

fn stepper(n: usize) -> QueensStepper {
    QueensStepper::new(QueensConfig::new(n)).expect("valid size")
}

/// Every solution, column per row, in lexicographic order.
fn brute_force(n: usize) -> Vec<Vec<usize>> {
    fn extend(n: usize, cols: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        let row = cols.len();
        if row == n {
            out.push(cols.clone());
            return;
        }
        for col in 0..n {
            let safe = cols
                .iter()
                .enumerate()
                .all(|(r, &c)| c != col && row - r != c.abs_diff(col));
            if safe {
                cols.push(col);
                extend(n, cols, out);
                cols.pop();
            }
        }
    }
    let mut out = Vec::new();
    extend(n, &mut Vec::new(), &mut out);
    out
}

fn columns(stepper: &QueensStepper) -> Vec<usize> {
    stepper
        .board()
        .expect("board")
        .queens()
        .into_iter()
        .map(|(_, c)| c)
        .collect()
}

// ACCEPTANCE: QUEENS-TABLE
#[test]
fn outcome_table_is_stable() {
    // (n, solved, backtracks, transitions)
    let table = [
        (1, true, 0, 3),
        (2, false, 2, 19),
        (3, false, 5, 55),
        (4, true, 4, 75),
        (5, true, 0, 41),
        (6, true, 25, 508),
        (8, true, 105, 2621),
    ];
    for (n, solved, backtracks, transitions) in table {
        let mut s = stepper(n);
        let report = s.run_to_completion();
        let expected = if solved {
            EngineStatus::Solved
        } else {
            EngineStatus::NoSolution
        };
        assert_eq!(report.status, expected, "n = {n}");
        assert_eq!(report.solution.is_some(), solved, "n = {n}");
        assert_eq!(report.counters.backtracks, backtracks, "n = {n}");
        assert_eq!(report.counters.transitions, transitions, "n = {n}");
        let terminal = report.log.last().copied().expect("terminal event");
        assert!(terminal.is_terminal());
        assert_eq!(report.log.count(terminal.as_str()), 1);
    }
}

// ACCEPTANCE: QUEENS-BRUTE-FORCE
#[test]
fn engine_finds_the_first_solution_in_row_major_order() {
    assert_eq!(brute_force(4).len(), 2);
    assert_eq!(brute_force(6).len(), 4);
    assert_eq!(brute_force(8).len(), 92);
    for n in 1..=8 {
        let all = brute_force(n);
        let mut s = stepper(n);
        let solved = s.run_to_completion().status == EngineStatus::Solved;
        assert_eq!(solved, !all.is_empty(), "n = {n}");
        if solved {
            let cols = columns(&s);
            assert_eq!(Some(&cols), all.first(), "n = {n}");
            assert!(s.board().expect("board").is_valid_solution());
        }
    }
    let mut s = stepper(4);
    s.run_to_completion();
    assert_eq!(columns(&s), vec![1, 3, 0, 2]);
    let mut s = stepper(8);
    s.run_to_completion();
    assert_eq!(columns(&s), vec![0, 4, 7, 5, 2, 6, 1, 3]);
}

// ACCEPTANCE: QUEENS-N4-COUNTERS
#[test]
fn four_queens_counters_and_first_backtrack() {
    let mut s = stepper(4);
    let report = s.run_to_completion();
    assert_eq!(report.counters.placements, 8);
    assert_eq!(report.counters.conflicts, 18);
    let entries = &report.log.entries;
    let first = entries
        .iter()
        .position(|e| matches!(e, QueensEvent::Backtracked { .. }))
        .expect("a backtrack");
    assert_eq!(entries[first], QueensEvent::Backtracked { row: 1, col: 2 });
    assert_eq!(entries[first + 1], QueensEvent::Trying { row: 1, col: 3 });
    assert_eq!(report.log.messages()[0], "Initialized 4x4 board");
    assert_eq!(
        report.log.messages().last().map(String::as_str),
        Some("Solution found!")
    );
}

// ACCEPTANCE: QUEENS-LOG-CANONICAL
#[test]
fn canonical_log_bytes_parse_back_to_the_log() {
    let mut s = stepper(4);
    s.run_to_completion();
    let bytes = s.log().to_canonical_json_bytes().expect("bytes");
    let text = std::str::from_utf8(&bytes).expect("utf-8");
    assert!(text.starts_with(
        r#"{"entries":[{"event":"initialized","message":"Initialized 4x4 board","n":4},"#
    ));

    let parsed: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
    assert_eq!(parsed, s.log().to_json_value());
    let entries = parsed["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), s.log().len());
    let messages: Vec<&str> = entries
        .iter()
        .map(|e| e["message"].as_str().expect("message"))
        .collect();
    assert_eq!(messages, s.log().messages());
    let conflict = entries
        .iter()
        .find(|e| e["event"] == "conflict")
        .expect("a conflict");
    assert_eq!(conflict["attacker"], serde_json::json!([0, 0]));
    assert_eq!(entries.last().map(|e| &e["event"]), Some(&serde_json::json!("solved")));
}

// ACCEPTANCE: QUEENS-UNDO-EXACT
#[test]
fn full_run_unwinds_to_the_initial_bytes() {
    let mut s = stepper(5);
    let initial = s.to_canonical_json_bytes().expect("bytes");
    let mut forward = vec![initial.clone()];
    while !s.is_done() {
        s.next_step();
        forward.push(s.to_canonical_json_bytes().expect("bytes"));
    }
    assert_eq!(s.stats().history_len, forward.len());
    for expected in forward.iter().rev().skip(1) {
        assert!(s.previous_step());
        assert_eq!(&s.to_canonical_json_bytes().expect("bytes"), expected);
    }
    assert!(!s.previous_step());
    assert_eq!(s.to_canonical_json_bytes().expect("bytes"), initial);
    assert_eq!(s.log().len(), 1);
}

// ACCEPTANCE: QUEENS-PURE-TRANSITION
#[test]
fn stepper_is_a_fold_over_transition() {
    let mut s = stepper(6);
    let mut state = EngineState::new(6).expect("valid size");
    let mut events = vec![QueensEvent::Initialized { n: 6 }];
    while !state.status.is_finished() {
        let (next, emitted) = transition(&state);
        state = next;
        events.extend(emitted);
    }
    s.run_to_completion();
    assert_eq!(s.state(), &state);
    assert_eq!(s.log().entries, events);
    let (again, none) = transition(&state);
    assert_eq!(again, state);
    assert!(none.is_empty());
}

// ACCEPTANCE: QUEENS-BOUNDED-HISTORY
#[test]
fn large_board_runs_with_a_single_checkpoint() {
    let mut s = stepper(20);
    let initial = s.to_canonical_json_bytes().expect("bytes");
    let report = s.run_to_completion();
    assert_eq!(report.status, EngineStatus::Solved);
    assert_eq!(report.counters.transitions, 11_977_511);
    assert_eq!(report.counters.backtracks, 199_615);
    assert_eq!(report.counters.placements, 199_635);
    assert!(report.solution.expect("solution").is_valid_solution());
    assert_eq!(s.stats().history_len, 2);

    assert!(s.previous_step());
    assert_eq!(s.to_canonical_json_bytes().expect("bytes"), initial);
    assert!(!s.previous_step());
}

#[test]
fn unsupported_sizes_are_rejected() {
    assert!(QueensStepper::new(QueensConfig::new(0)).is_err());
    assert!(QueensStepper::new(QueensConfig::new(33)).is_err());
    assert!(QueensStepper::new(QueensConfig::new(32)).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Any interleaving of forward and back steps lands on the same snapshot
    // as stepping forward the net number of times from scratch.
    #[test]
    fn undo_interleavings_match_a_fresh_replay(
        n in 4usize..=7,
        ops in proptest::collection::vec(any::<bool>(), 0..120),
    ) {
        let mut s = stepper(n);
        let mut position = 0usize;
        for forward in ops {
            if forward {
                if !s.is_done() {
                    s.next_step();
                    position += 1;
                }
            } else if s.previous_step() {
                position -= 1;
            }
        }
        let mut fresh = stepper(n);
        for _ in 0..position {
            fresh.next_step();
        }
        prop_assert_eq!(s.to_json_value(), fresh.to_json_value());
        prop_assert_eq!(s.stats().history_len, position + 1);
    }
}
