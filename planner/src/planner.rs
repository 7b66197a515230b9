//! The goal-stack engine.
//!
//! The stack starts as one conjunction of every goal. Each step pops the top
//! item and reacts by kind:
//!
//! - conjunction: pop if every member holds; otherwise push the unmet
//!   members (first member on top). Forward mode re-pushes the conjunction
//!   underneath so it is re-checked.
//! - goal: pop if it holds; otherwise ask [`crate::select`] what to do.
//! - operator: forward mode applies it once its preconditions hold, unless
//!   none of its add-effects is both missing and still wanted by something on
//!   the stack; regression mode only notes it.
//!
//! A step ceiling bounds every run.

use waypoint_kernel::blocks::{Operator, Predicate, World};

use crate::config::{PlannerConfig, PlannerMode};
use crate::error::PlannerError;
use crate::log::{PlanAction, PlanLog, PlanStep};
use crate::select::{select_forward, select_regression, Selection};
use crate::stack::StackItem;

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanOutcome {
    Complete,
    GoalsUnmet,
    /// The step ceiling was reached; the goals may loop or conflict.
    StepLimit,
}

impl PlanOutcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Read-only counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerStats {
    pub steps: u64,
    pub stack_depth: usize,
    pub plan_length: usize,
    pub world_size: usize,
    pub outcome: Option<PlanOutcome>,
}

/// Aggregate result of [`GoalStackPlanner::run`].
#[derive(Debug)]
pub struct PlanReport<'a> {
    pub outcome: PlanOutcome,
    /// Applied operators (forward mode).
    pub plan: &'a [Operator],
    /// Operators in decomposition order (regression mode).
    pub regression_plan: &'a [Operator],
    pub steps: u64,
    pub world: &'a World,
    pub log: &'a PlanLog,
}

struct Draft {
    action: PlanAction,
    message: String,
    goal: Option<Predicate>,
    operator: Option<Operator>,
}

impl Draft {
    fn new(action: PlanAction, message: String) -> Self {
        Self {
            action,
            message,
            goal: None,
            operator: None,
        }
    }

    fn goal(mut self, goal: Predicate) -> Self {
        self.goal = Some(goal);
        self
    }

    fn operator(mut self, op: Operator) -> Self {
        self.operator = Some(op);
        self
    }
}

fn join(ps: &[Predicate]) -> String {
    ps.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Goal-stack planner owning its stack, world, plan, and log.
#[derive(Debug, Clone)]
pub struct GoalStackPlanner {
    goals: Vec<Predicate>,
    mode: PlannerMode,
    max_steps: u64,
    initial: World,
    world: World,
    stack: Vec<StackItem>,
    plan: Vec<Operator>,
    regression_plan: Vec<Operator>,
    log: PlanLog,
    steps: u64,
    last_decomposed: Option<Predicate>,
    outcome: Option<PlanOutcome>,
}

impl GoalStackPlanner {
    /// # Errors
    ///
    /// Returns the [`PlannerError`] from [`PlannerConfig::validate`].
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        config.validate()?;
        tracing::debug!(
            mode = config.mode.as_str(),
            goals = config.goals.len(),
            max_steps = config.max_steps,
            "planner configured"
        );
        Ok(Self {
            stack: vec![StackItem::Conjunction(config.goals.clone())],
            world: config.initial.clone(),
            initial: config.initial,
            goals: config.goals,
            mode: config.mode,
            max_steps: config.max_steps,
            plan: Vec::new(),
            regression_plan: Vec::new(),
            log: PlanLog::default(),
            steps: 0,
            last_decomposed: None,
            outcome: None,
        })
    }

    /// Back to the initial world with a fresh stack and an empty log.
    pub fn reset(&mut self) {
        self.world = self.initial.clone();
        self.stack = vec![StackItem::Conjunction(self.goals.clone())];
        self.plan.clear();
        self.regression_plan.clear();
        self.log = PlanLog::default();
        self.steps = 0;
        self.last_decomposed = None;
        self.outcome = None;
    }

    /// Process one stack item, or emit the terminal entry.
    ///
    /// Once finished, returns the terminal entry again without logging.
    pub fn step(&mut self) -> &PlanStep {
        if self.outcome.is_some() {
            if let Some(last) = self.log.entries.len().checked_sub(1) {
                return &self.log.entries[last];
            }
        }
        let draft = self.advance();
        self.record(draft)
    }

    /// Step until a terminal entry.
    pub fn run(&mut self) -> PlanReport<'_> {
        let outcome = loop {
            self.step();
            if let Some(outcome) = self.outcome {
                break outcome;
            }
        };
        PlanReport {
            outcome,
            plan: &self.plan,
            regression_plan: &self.regression_plan,
            steps: self.steps,
            world: &self.world,
            log: &self.log,
        }
    }

    fn advance(&mut self) -> Draft {
        if self.steps >= self.max_steps && !self.stack.is_empty() {
            self.outcome = Some(PlanOutcome::StepLimit);
            return Draft::new(
                PlanAction::StepLimit,
                format!(
                    "Step limit of {} reached with {} item(s) still on the stack; possible loop",
                    self.max_steps,
                    self.stack.len()
                ),
            );
        }
        let Some(item) = self.stack.pop() else {
            return self.finish_empty();
        };
        self.steps += 1;
        match item {
            StackItem::Conjunction(goals) => self.on_conjunction(goals),
            StackItem::Goal(goal) => {
                if self.world.holds(&goal) {
                    return Draft::new(PlanAction::GoalSatisfied, format!("{goal} already holds"))
                        .goal(goal);
                }
                match self.mode {
                    PlannerMode::Forward => self.decompose_forward(goal),
                    PlannerMode::Regression => self.decompose_regression(goal),
                }
            }
            StackItem::Operator { op, purpose } => match self.mode {
                PlannerMode::Forward => self.on_operator(op, purpose),
                PlannerMode::Regression => {
                    self.last_decomposed = None;
                    Draft::new(
                        PlanAction::OperatorRegressed,
                        format!("Reached {op}; forward execution would apply it here"),
                    )
                    .goal(purpose)
                    .operator(op)
                }
            },
        }
    }

    fn finish_empty(&mut self) -> Draft {
        let unmet: Vec<Predicate> = match self.mode {
            PlannerMode::Forward => self.world.unsatisfied(&self.goals).into_iter().cloned().collect(),
            PlannerMode::Regression => Vec::new(),
        };
        if unmet.is_empty() {
            self.outcome = Some(PlanOutcome::Complete);
            let message = match self.mode {
                PlannerMode::Forward => format!(
                    "Goal stack empty; all {} goal(s) hold. Plan has {} step(s)",
                    self.goals.len(),
                    self.plan.len()
                ),
                PlannerMode::Regression => format!(
                    "Goal stack empty; regression plan has {} operator(s)",
                    self.regression_plan.len()
                ),
            };
            Draft::new(PlanAction::Complete, message)
        } else {
            self.outcome = Some(PlanOutcome::GoalsUnmet);
            Draft::new(
                PlanAction::GoalsUnmet,
                format!("Goal stack empty but {} do not hold", join(&unmet)),
            )
        }
    }

    fn on_conjunction(&mut self, goals: Vec<Predicate>) -> Draft {
        let unmet: Vec<Predicate> = self.world.unsatisfied(&goals).into_iter().cloned().collect();
        if unmet.is_empty() {
            return Draft::new(
                PlanAction::ConjunctionSatisfied,
                format!("All {} goal(s) of the conjunction hold", goals.len()),
            );
        }
        let message = format!("Unsatisfied goals pushed: {}", join(&unmet));
        if self.mode == PlannerMode::Forward {
            self.stack.push(StackItem::Conjunction(goals));
        }
        self.stack
            .extend(unmet.into_iter().rev().map(StackItem::Goal));
        Draft::new(PlanAction::ConjunctionDecomposed, message)
    }

    fn push_operator(&mut self, op: &Operator, purpose: &Predicate) {
        self.stack.push(StackItem::Operator {
            op: op.clone(),
            purpose: purpose.clone(),
        });
        self.stack.extend(
            op.preconditions()
                .iter()
                .rev()
                .cloned()
                .map(StackItem::Goal),
        );
    }

    fn decompose_forward(&mut self, goal: Predicate) -> Draft {
        match select_forward(&goal, &self.world) {
            Selection::Operator(op) => {
                self.push_operator(&op, &goal);
                Draft::new(
                    PlanAction::OperatorSelected,
                    format!(
                        "Selected {op} to achieve {goal}; pushed preconditions {}",
                        join(op.preconditions())
                    ),
                )
                .goal(goal)
                .operator(op)
            }
            Selection::Subgoals(subgoals) => {
                let message = format!("{goal} needs {} first", join(&subgoals));
                self.stack.push(StackItem::Goal(goal.clone()));
                self.stack
                    .extend(subgoals.into_iter().rev().map(StackItem::Goal));
                Draft::new(PlanAction::SubgoalsPushed, message).goal(goal)
            }
            Selection::InferClear(block) => {
                self.world.insert(Predicate::clear(block.as_str()));
                Draft::new(
                    PlanAction::ClearInferred,
                    format!("Nothing is on {block} and it is not held; inferred {goal}"),
                )
                .goal(goal)
            }
            Selection::Unachievable => Draft::new(
                PlanAction::NoOperator,
                format!("No operator achieves {goal} in the current world; dropped"),
            )
            .goal(goal),
        }
    }

    fn decompose_regression(&mut self, goal: Predicate) -> Draft {
        if self.last_decomposed.as_ref() == Some(&goal) {
            return Draft::new(
                PlanAction::AlreadyDecomposed,
                format!("{goal} was just decomposed; skipped"),
            )
            .goal(goal);
        }
        match select_regression(&goal, &self.world) {
            Selection::Operator(op) => {
                if self.regression_plan.last() != Some(&op) {
                    self.regression_plan.push(op.clone());
                }
                self.push_operator(&op, &goal);
                self.last_decomposed = Some(goal.clone());
                Draft::new(
                    PlanAction::OperatorSelected,
                    format!(
                        "Regressed {goal} through {op}; pushed preconditions {}",
                        join(op.preconditions())
                    ),
                )
                .goal(goal)
                .operator(op)
            }
            Selection::Subgoals(_) | Selection::InferClear(_) | Selection::Unachievable => {
                Draft::new(
                    PlanAction::NoOperator,
                    format!("No operator achieves {goal} from the initial world; dropped"),
                )
                .goal(goal)
            }
        }
    }

    fn on_operator(&mut self, op: Operator, purpose: Predicate) -> Draft {
        let pending = op.unsatisfied_preconditions(&self.world);
        if !pending.is_empty() {
            let message = format!("{op} waits on {}", join(&pending));
            self.stack.push(StackItem::Operator {
                op: op.clone(),
                purpose: purpose.clone(),
            });
            self.stack
                .extend(pending.into_iter().rev().map(StackItem::Goal));
            return Draft::new(PlanAction::PreconditionsPending, message)
                .goal(purpose)
                .operator(op);
        }
        if !self.is_helpful(&op, &purpose) {
            return Draft::new(
                PlanAction::SkippedRedundant,
                format!("{op} adds nothing still needed; skipped"),
            )
            .goal(purpose)
            .operator(op);
        }
        self.world.apply(&op);
        self.plan.push(op.clone());
        Draft::new(
            PlanAction::OperatorApplied,
            format!("Applied {op}; plan has {} step(s)", self.plan.len()),
        )
        .goal(purpose)
        .operator(op)
    }

    /// Some add-effect is missing from the world and wanted by `purpose` or
    /// by an item still on the stack.
    fn is_helpful(&self, op: &Operator, purpose: &Predicate) -> bool {
        op.add_effects()
            .iter()
            .any(|a| !self.world.holds(a) && self.is_outstanding(a, purpose))
    }

    fn is_outstanding(&self, p: &Predicate, purpose: &Predicate) -> bool {
        p == purpose
            || self.stack.iter().any(|item| match item {
                StackItem::Conjunction(goals) => goals.contains(p),
                StackItem::Goal(g) => g == p,
                StackItem::Operator { op, purpose } => {
                    purpose == p || op.preconditions().contains(p)
                }
            })
    }

    fn record(&mut self, draft: Draft) -> &PlanStep {
        let plan = match self.mode {
            PlannerMode::Forward => &self.plan,
            PlannerMode::Regression => &self.regression_plan,
        };
        let entry = PlanStep {
            step: self.steps,
            action: draft.action,
            message: draft.message,
            goal: draft.goal,
            operator: draft.operator,
            stack: self.stack_snapshot(),
            world: self.world.to_strings(),
            plan: plan.iter().map(ToString::to_string).collect(),
        };
        if entry.action.is_terminal() {
            tracing::info!(
                steps = self.steps,
                action = entry.action.as_str(),
                plan = entry.plan.len(),
                "planner finished"
            );
        } else {
            tracing::debug!(
                step = self.steps,
                action = entry.action.as_str(),
                depth = self.stack.len(),
                message = %entry.message,
                "planner step"
            );
        }
        let idx = self.log.entries.len();
        self.log.entries.push(entry);
        &self.log.entries[idx]
    }

    /// Stack rendered top first.
    #[must_use]
    pub fn stack_snapshot(&self) -> Vec<String> {
        self.stack.iter().rev().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn stack(&self) -> &[StackItem] {
        &self.stack
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn goals(&self) -> &[Predicate] {
        &self.goals
    }

    #[must_use]
    pub fn mode(&self) -> PlannerMode {
        self.mode
    }

    #[must_use]
    pub fn plan(&self) -> &[Operator] {
        &self.plan
    }

    #[must_use]
    pub fn regression_plan(&self) -> &[Operator] {
        &self.regression_plan
    }

    #[must_use]
    pub fn log(&self) -> &PlanLog {
        &self.log
    }

    #[must_use]
    pub fn outcome(&self) -> Option<PlanOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn stats(&self) -> PlannerStats {
        PlannerStats {
            steps: self.steps,
            stack_depth: self.stack.len(),
            plan_length: match self.mode {
                PlannerMode::Forward => self.plan.len(),
                PlannerMode::Regression => self.regression_plan.len(),
            },
            world_size: self.world.len(),
            outcome: self.outcome,
        }
    }
}
