//! Goal-stack planner lock tests: termination, plan validity by replay, the
//! step ceiling, and log determinism.

use waypoint_kernel::blocks::{canonical_scenario, sussman_scenario, Operator, Predicate, World};
use waypoint_planner::{
    plan_digest, GoalStackPlanner, PlanAction, PlanOutcome, PlannerConfig, PlannerMode,
    DEFAULT_MAX_STEPS,
};

fn replay(initial: &World, plan: &[Operator]) -> World {
    let mut world = initial.clone();
    for op in plan {
        assert!(
            op.is_applicable(&world),
            "{op} is not applicable in {world}"
        );
        world.apply(op);
    }
    world
}

fn run(config: PlannerConfig) -> (PlanOutcome, Vec<Operator>, GoalStackPlanner) {
    let mut planner = GoalStackPlanner::new(config).expect("valid config");
    let report = planner.run();
    let (outcome, plan) = (report.outcome, report.plan.to_vec());
    (outcome, plan, planner)
}

// ACCEPTANCE: PLANNER-CANONICAL-VALID
#[test]
fn canonical_plan_replays_to_the_goals() {
    let scenario = canonical_scenario();
    let (outcome, plan, planner) = run(PlannerConfig::from_scenario(&scenario));
    assert_eq!(outcome, PlanOutcome::Complete);
    let final_world = replay(&scenario.initial, &plan);
    for goal in &scenario.goals {
        assert!(final_world.holds(goal), "{goal} missing after replay");
    }
    assert_eq!(&final_world, planner.world());
    assert_eq!(
        plan.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "PICKUP(C)",
            "PUTDOWN(C)",
            "UNSTACK(B,A)",
            "PUTDOWN(B)",
            "PICKUP(C)",
            "STACK(C,A)",
            "PICKUP(B)",
            "STACK(B,D)"
        ]
    );
}

// ACCEPTANCE: PLANNER-SUSSMAN
#[test]
fn sussman_and_tower_reversal_are_valid() {
    let sussman = sussman_scenario();
    let (outcome, plan, _) = run(PlannerConfig::from_scenario(&sussman));
    assert!(outcome.is_success());
    assert!(replay(&sussman.initial, &plan).satisfies_all(&sussman.goals));

    let config = PlannerConfig::from_text(
        "ON(A,B)\nON(B,C)\nONTABLE(C)\nCLEAR(A)\nARMEMPTY",
        "ON(C,B)\nON(B,A)\nONTABLE(A)",
    )
    .expect("parses");
    let initial = config.initial.clone();
    let goals = config.goals.clone();
    let (outcome, plan, planner) = run(config);
    assert!(outcome.is_success());
    assert_eq!(plan.len(), 12);
    assert_eq!(planner.stats().steps, 54);
    assert!(replay(&initial, &plan).satisfies_all(&goals));
}

// ACCEPTANCE: PLANNER-STEP-CEILING
#[test]
fn contradictory_goals_stop_at_the_ceiling() {
    let initial = PlannerConfig::from_text("ONTABLE(A,B)\nCLEAR(A,B)\nARMEMPTY", "ARMEMPTY")
        .expect("parses")
        .initial;
    let goals = vec![Predicate::on("A", "B"), Predicate::on("B", "A")];
    let (outcome, plan, planner) = run(PlannerConfig::new(initial, goals));
    assert_eq!(outcome, PlanOutcome::StepLimit);
    assert_eq!(planner.stats().steps, DEFAULT_MAX_STEPS);
    assert!(planner.stats().stack_depth > 0);
    assert_eq!(planner.log().len() as u64, DEFAULT_MAX_STEPS + 1);
    assert_eq!(plan.len(), planner.log().with_action(PlanAction::OperatorApplied).count());
    let last = planner.log().last().expect("terminal entry");
    assert_eq!(last.action, PlanAction::StepLimit);
    assert!(last.message.contains("possible loop"));
}

// ACCEPTANCE: PLANNER-DETERMINISM
#[test]
fn identical_inputs_give_identical_logs() {
    let digest = |mode| {
        let (_, plan, planner) =
            run(PlannerConfig::from_scenario(&canonical_scenario()).with_mode(mode));
        (
            planner.log().digest().expect("digest"),
            plan_digest(&plan).expect("digest"),
        )
    };
    assert_eq!(digest(PlannerMode::Forward), digest(PlannerMode::Forward));
    assert_eq!(digest(PlannerMode::Regression), digest(PlannerMode::Regression));
    assert_ne!(
        digest(PlannerMode::Forward).0,
        digest(PlannerMode::Regression).0
    );
}

// ACCEPTANCE: PLANNER-REGRESSION
#[test]
fn regression_mode_never_touches_the_world() {
    let scenario = canonical_scenario();
    let mut planner = GoalStackPlanner::new(
        PlannerConfig::from_scenario(&scenario).with_mode(PlannerMode::Regression),
    )
    .expect("valid config");
    while !planner.is_done() {
        let entry = planner.step();
        assert_eq!(
            entry.world,
            scenario.initial.to_strings(),
            "world changed at step {}",
            entry.step
        );
        assert_ne!(entry.action, PlanAction::OperatorApplied);
    }
    assert!(planner.plan().is_empty());
    assert_eq!(planner.regression_plan().len(), 5);
    assert_eq!(planner.outcome(), Some(PlanOutcome::Complete));
}

// ACCEPTANCE: PLANNER-LOG-SNAPSHOTS
#[test]
fn every_entry_carries_snapshots() {
    let (_, plan, planner) = run(PlannerConfig::from_scenario(&canonical_scenario()));
    let log = planner.log();
    assert_eq!(log.len(), 35);
    for (i, entry) in log.entries.iter().enumerate() {
        assert!(!entry.message.is_empty());
        assert!(!entry.world.is_empty());
        assert!(entry.plan.len() <= plan.len());
        if i + 1 < log.len() {
            assert_eq!(entry.step, i as u64 + 1);
        }
    }
    let last = log.last().expect("terminal entry");
    assert_eq!(last.action, PlanAction::Complete);
    assert!(last.stack.is_empty());
    assert_eq!(last.plan.len(), plan.len());
    let json = log.to_json_value();
    assert_eq!(json.as_array().map(Vec::len), Some(35));
    assert_eq!(json[0]["step"], 1);
    assert_eq!(log.with_action(PlanAction::OperatorApplied).count(), plan.len());
}

// ACCEPTANCE: PLANNER-VALIDATION
#[test]
fn malformed_configuration_fails_fast() {
    assert!(PlannerConfig::from_text("ON(A)", "CLEAR(A)").is_err());
    assert!(PlannerConfig::from_text("JUMP(A)", "CLEAR(A)").is_err());
    let scenario = canonical_scenario();
    assert!(GoalStackPlanner::new(PlannerConfig::new(scenario.initial.clone(), vec![])).is_err());
    let mut bad = scenario.initial.clone();
    bad.insert(Predicate::holding("C"));
    assert!(GoalStackPlanner::new(PlannerConfig::new(bad, scenario.goals)).is_err());
}
