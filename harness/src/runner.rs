//! One stepping contract for every engine, and a timer-driven driver.
//!
//! [`AutoRunner`] calls [`Stepper::advance`] repeatedly, sleeping between
//! calls. Cancellation is checked between steps only, so a step is never
//! interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use waypoint_backtrack::QueensStepper;
use waypoint_planner::GoalStackPlanner;
use waypoint_search::{AStarSolver, SearchWorld};

/// What one step reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub done: bool,
    pub message: String,
}

/// An engine that can be advanced one discrete step at a time.
pub trait Stepper {
    /// Perform one step. Calling this after completion must not change
    /// engine state.
    fn advance(&mut self) -> Tick;

    fn is_done(&self) -> bool;
}

impl<W: SearchWorld> Stepper for AStarSolver<W> {
    fn advance(&mut self) -> Tick {
        let step = self.step();
        Tick {
            done: step.is_done(),
            message: step.message().to_string(),
        }
    }

    fn is_done(&self) -> bool {
        AStarSolver::is_done(self)
    }
}

impl Stepper for GoalStackPlanner {
    fn advance(&mut self) -> Tick {
        let entry = self.step();
        Tick {
            done: entry.action.is_terminal(),
            message: entry.message.clone(),
        }
    }

    fn is_done(&self) -> bool {
        GoalStackPlanner::is_done(self)
    }
}

impl Stepper for QueensStepper {
    /// Unrecorded: an auto run is undone as a whole, not per step.
    fn advance(&mut self) -> Tick {
        let message = match self.auto_step() {
            Some(event) => event.message(),
            None if QueensStepper::is_done(self) => self
                .log()
                .last()
                .map(waypoint_backtrack::QueensEvent::message)
                .unwrap_or_default(),
            None => "Moving to the next column".to_string(),
        };
        Tick {
            done: QueensStepper::is_done(self),
            message,
        }
    }

    fn is_done(&self) -> bool {
        QueensStepper::is_done(self)
    }
}

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Why [`AutoRunner::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Finished,
    Cancelled,
    StepBudget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub stop: StopReason,
    pub last_message: Option<String>,
}

/// Drives a [`Stepper`] on a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRunner {
    pub interval: Duration,
    /// Steps this run may take; `None` runs until done or cancelled.
    pub max_steps: Option<u64>,
}

impl Default for AutoRunner {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_steps: None,
        }
    }
}

impl AutoRunner {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_steps: None,
        }
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn run<S: Stepper + ?Sized>(&self, stepper: &mut S, cancel: &CancelToken) -> RunSummary {
        self.run_with(stepper, cancel, |_| {})
    }

    /// Like [`Self::run`], handing every tick to `observe` as it happens.
    pub fn run_with<S, F>(&self, stepper: &mut S, cancel: &CancelToken, mut observe: F) -> RunSummary
    where
        S: Stepper + ?Sized,
        F: FnMut(&Tick),
    {
        let mut steps = 0;
        let mut last_message = None;
        let stop = loop {
            if stepper.is_done() {
                break StopReason::Finished;
            }
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self.max_steps.is_some_and(|max| steps >= max) {
                break StopReason::StepBudget;
            }
            if steps > 0 && !self.interval.is_zero() {
                std::thread::sleep(self.interval);
                if cancel.is_cancelled() {
                    break StopReason::Cancelled;
                }
            }
            let tick = stepper.advance();
            steps += 1;
            observe(&tick);
            last_message = Some(tick.message);
        };
        tracing::debug!(steps, ?stop, "auto run stopped");
        RunSummary {
            steps,
            stop,
            last_message,
        }
    }
}
