//! River-crossing lock tests: the bank-safety invariant over everything the
//! search or the game can reach.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;
use waypoint_harness::river_game::{GameStatus, MoveResult, RiverGame};
use waypoint_harness::worlds::RiverCrossing;
use waypoint_kernel::river::{RiverConfig, RiverState, BOAT_LOADS};
use waypoint_search::{SearchPolicy, SearchWorld};

fn reachable(config: &RiverConfig) -> BTreeSet<RiverState> {
    let start = config.start();
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(state) = queue.pop_front() {
        for (_, next) in state.successors(config) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

// ACCEPTANCE: RIVER-SAFETY-REACHABLE
#[test]
fn every_reachable_state_is_safe() {
    let config = RiverConfig::default();
    let states = reachable(&config);
    assert!(states.len() > 10);
    for s in &states {
        assert!(s.is_safe(&config), "unsafe state {s}");
        assert!(s.missionaries <= 3 && s.cannibals <= 3);
    }
    assert!(states.iter().any(RiverState::is_goal));
}

// ACCEPTANCE: RIVER-SAFETY-SEARCH
#[test]
fn search_only_touches_safe_states() {
    let world = RiverCrossing::default();
    let config = *world.config();
    let mut solver = world.solver(SearchPolicy::default()).expect("valid policy");
    let report = solver.solve();
    assert!(report.success);
    assert_eq!(report.moves(), Some(11));

    let safe_keys: BTreeSet<String> = reachable(&config).iter().map(RiverState::key).collect();
    for event in &report.log.events {
        assert!(safe_keys.contains(&event.key));
        for succ in &event.successors {
            assert!(safe_keys.contains(&succ.key), "generated unsafe {}", succ.key);
        }
    }
    for key in solver.closed_keys() {
        assert!(safe_keys.contains(key));
    }
    for node in solver.nodes() {
        assert!(solver.world().key(&node.state) == node.key);
        assert!(node.state.is_safe(&config));
    }
}

// ACCEPTANCE: RIVER-GAME-LOSS
#[test]
fn manual_loss_is_distinct_from_refusal() {
    let mut game = RiverGame::new(RiverConfig::default()).expect("valid config");
    assert_eq!(game.make_move(3, 0), MoveResult { success: false, lost: false });
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.make_move(2, 0), MoveResult { success: false, lost: true });
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.state(), RiverConfig::default().start());
}

proptest! {
    #[test]
    fn generalised_totals_stay_safe(m in 1u32..=6, extra in 0u32..=3, c_less in 0u32..=3) {
        let cannibals = m.saturating_sub(c_less).max(1);
        let missionaries = m + extra;
        let config = RiverConfig { missionaries, cannibals };
        prop_assume!(config.validate().is_ok());
        for s in reachable(&config) {
            prop_assert!(s.is_safe(&config));
        }
        let mut solver = RiverCrossing::new(config)
            .expect("validated")
            .solver(SearchPolicy::default())
            .expect("valid policy");
        let report = solver.solve();
        for step in &report.path {
            prop_assert!(step.state.is_safe(&config));
        }
        if report.success {
            prop_assert!(report.path.last().is_some_and(|p| p.state.is_goal()));
        }
    }

    #[test]
    fn random_manual_play_never_corrupts_state(loads in proptest::collection::vec(0usize..BOAT_LOADS.len(), 0..40)) {
        let config = RiverConfig::default();
        let mut game = RiverGame::new(config).expect("valid config");
        for i in loads {
            let load = BOAT_LOADS[i];
            let before = game.state();
            let result = game.make_move(load.missionaries, load.cannibals);
            prop_assert!(game.state().is_safe(&config));
            if !result.success {
                prop_assert_eq!(game.state(), before);
            }
            if result.lost {
                prop_assert_eq!(game.status(), GameStatus::Lost);
            }
        }
        for pair in game.history().windows(2) {
            prop_assert_eq!(pair[0].to, pair[1].from);
        }
    }
}
