//! Auto-run lock tests: cancellation from another thread lands between
//! steps, and a resumed run finishes exactly where a manual run does.

use std::time::Duration;

use waypoint_backtrack::{QueensConfig, QueensStepper};
use waypoint_harness::runner::{AutoRunner, CancelToken, StopReason, Stepper};
use waypoint_harness::worlds::EightPuzzle;
use waypoint_kernel::puzzle::Board;
use waypoint_search::SearchPolicy;

// ACCEPTANCE: RUNNER-CROSS-THREAD-CANCEL
#[test]
fn cancel_from_another_thread_then_resume() {
    let mut stepper = QueensStepper::new(QueensConfig::new(8)).expect("valid size");
    let cancel = CancelToken::new();
    let runner = AutoRunner::new(Duration::from_millis(2));

    let first = std::thread::scope(|scope| {
        let remote = cancel.clone();
        scope.spawn(move || {
            std::thread::sleep(Duration::from_millis(40));
            remote.cancel();
        });
        runner.run(&mut stepper, &cancel)
    });
    assert_eq!(first.stop, StopReason::Cancelled);
    assert!(first.steps > 0);
    assert!(first.steps < 2621);
    assert_eq!(stepper.stats().counters.transitions, first.steps);
    assert!(!Stepper::is_done(&stepper));

    let rest = AutoRunner::new(Duration::ZERO).run(&mut stepper, &CancelToken::new());
    assert_eq!(rest.stop, StopReason::Finished);
    assert_eq!(first.steps + rest.steps, 2621);
    assert_eq!(rest.last_message.as_deref(), Some("Solution found!"));
    assert_eq!(stepper.stats().history_len, 2, "one checkpoint per auto run");

    let mut manual = QueensStepper::new(QueensConfig::new(8)).expect("valid size");
    manual.run_to_completion();
    assert_eq!(
        stepper.to_canonical_json_bytes().expect("bytes"),
        manual.to_canonical_json_bytes().expect("bytes")
    );
}

// ACCEPTANCE: RUNNER-NO-STEP-AFTER-DONE
#[test]
fn finished_engines_take_no_further_steps() {
    let start: Board = "1 2 3 4 0 6 7 5 8".parse().expect("board");
    let mut solver = EightPuzzle::default()
        .solver(start, SearchPolicy::default())
        .expect("solvable");
    let runner = AutoRunner::new(Duration::ZERO);
    let summary = runner.run(&mut solver, &CancelToken::new());
    assert_eq!(summary.stop, StopReason::Finished);
    assert_eq!(summary.steps, 3);
    let stats = solver.stats();
    let again = runner.run(&mut solver, &CancelToken::new());
    assert_eq!(again.steps, 0);
    assert_eq!(again.last_message, None);
    assert_eq!(solver.stats(), stats);
}
