//! Deterministic run transcripts.
//!
//! A transcript is a sorted set of `key=value` lines: counts, outcomes, and
//! content digests of each engine's step log. Two runs over the same inputs
//! must render byte-identical transcripts, in or across processes.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use waypoint_backtrack::{QueensConfig, QueensStepper};
use waypoint_kernel::blocks::{canonical_scenario, sussman_scenario, Scenario};
use waypoint_kernel::proof::hash::{canonical_json_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;
use waypoint_kernel::puzzle::Board;
use waypoint_planner::{plan_digest, GoalStackPlanner, PlannerConfig, PlannerMode};
use waypoint_search::{AStarSolver, PathStep, SearchPolicy, SearchWorld};

use crate::error::HarnessError;
use crate::worlds::{EightPuzzle, RiverCrossing};

/// Seed for the generated 8-puzzle start in [`standard_transcript`].
pub const PUZZLE_SEED: u64 = 42;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: BTreeMap<String, String>,
}

impl Transcript {
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.lines.insert(key.into(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// One `key=value` line per entry, sorted by key.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect()
    }
}

/// Digest of the state keys along a solution path.
///
/// # Errors
///
/// [`HarnessError::Canon`] if canonicalization fails.
pub fn path_digest<S>(path: &[PathStep<S>]) -> Result<ContentHash, HarnessError> {
    let keys: Vec<&str> = path.iter().map(|p| p.key.as_str()).collect();
    Ok(canonical_json_hash(
        HashDomain::SearchPath,
        &serde_json::json!(keys),
    )?)
}

/// Solve and record outcome, counts, and digests under `prefix`.
///
/// # Errors
///
/// [`HarnessError::Canon`] if a digest cannot be computed.
pub fn record_search<W: SearchWorld>(
    transcript: &mut Transcript,
    prefix: &str,
    solver: &mut AStarSolver<W>,
) -> Result<(), HarnessError> {
    let report = solver.solve();
    transcript.insert(format!("{prefix}.success"), report.success);
    transcript.insert(format!("{prefix}.expanded"), report.nodes_expanded);
    transcript.insert(
        format!("{prefix}.moves"),
        report.moves().map_or_else(|| "none".to_string(), |m| m.to_string()),
    );
    transcript.insert(format!("{prefix}.path_digest"), path_digest(&report.path)?);
    transcript.insert(format!("{prefix}.log_digest"), report.log.digest()?);
    Ok(())
}

/// Run the planner to completion and record it under `prefix`.
///
/// # Errors
///
/// [`HarnessError::Planner`] for an invalid config, or
/// [`HarnessError::Canon`] if a digest cannot be computed.
pub fn record_planner(
    transcript: &mut Transcript,
    prefix: &str,
    config: PlannerConfig,
) -> Result<(), HarnessError> {
    let mut planner = GoalStackPlanner::new(config)?;
    let mode = planner.mode();
    let report = planner.run();
    let plan = match mode {
        PlannerMode::Forward => report.plan,
        PlannerMode::Regression => report.regression_plan,
    };
    transcript.insert(format!("{prefix}.outcome"), format!("{:?}", report.outcome));
    transcript.insert(format!("{prefix}.steps"), report.steps);
    transcript.insert(format!("{prefix}.plan_len"), plan.len());
    transcript.insert(format!("{prefix}.plan_digest"), plan_digest(plan)?);
    transcript.insert(format!("{prefix}.log_digest"), report.log.digest()?);
    Ok(())
}

/// Run N-Queens to completion and record it under `prefix`.
///
/// # Errors
///
/// [`HarnessError::Queens`] for an invalid size, or
/// [`HarnessError::Canon`] if a digest cannot be computed.
pub fn record_queens(transcript: &mut Transcript, prefix: &str, n: usize) -> Result<(), HarnessError> {
    let mut stepper = QueensStepper::new(QueensConfig::new(n))?;
    let report = stepper.run_to_completion();
    transcript.insert(format!("{prefix}.status"), report.status.as_str());
    transcript.insert(format!("{prefix}.transitions"), report.counters.transitions);
    transcript.insert(format!("{prefix}.backtracks"), report.counters.backtracks);
    transcript.insert(
        format!("{prefix}.solution"),
        report.solution.map_or_else(
            || "none".to_string(),
            |b| {
                b.queens()
                    .iter()
                    .map(|(_, c)| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            },
        ),
    );
    transcript.insert(format!("{prefix}.log_digest"), report.log.digest()?);
    Ok(())
}

fn scenario_config(scenario: &Scenario, mode: PlannerMode) -> PlannerConfig {
    PlannerConfig::from_scenario(scenario).with_mode(mode)
}

/// The fixed workload: one run of every engine on its reference inputs.
///
/// # Errors
///
/// Any [`HarnessError`] from building or digesting a run.
pub fn standard_transcript() -> Result<Transcript, HarnessError> {
    let mut t = Transcript::default();

    let easy = Board::from_rows([[1, 2, 3], [4, 0, 6], [7, 5, 8]])?;
    record_search(
        &mut t,
        "eight_puzzle.easy",
        &mut EightPuzzle::default().solver(easy, SearchPolicy::default())?,
    )?;

    let world = EightPuzzle::default();
    let seeded = world.random_start(&mut StdRng::seed_from_u64(PUZZLE_SEED));
    t.insert("eight_puzzle.seeded.start", seeded.key());
    record_search(
        &mut t,
        "eight_puzzle.seeded",
        &mut world.solver(seeded, SearchPolicy::default())?,
    )?;

    record_search(
        &mut t,
        "river.3x3",
        &mut RiverCrossing::default().solver(SearchPolicy::default())?,
    )?;

    record_planner(
        &mut t,
        "planner.canonical.forward",
        scenario_config(&canonical_scenario(), PlannerMode::Forward),
    )?;
    record_planner(
        &mut t,
        "planner.canonical.regression",
        scenario_config(&canonical_scenario(), PlannerMode::Regression),
    )?;
    record_planner(
        &mut t,
        "planner.sussman.forward",
        scenario_config(&sussman_scenario(), PlannerMode::Forward),
    )?;

    record_queens(&mut t, "queens.4", 4)?;
    record_queens(&mut t, "queens.8", 8)?;

    tracing::info!(entries = t.len(), "standard transcript built");
    Ok(t)
}
