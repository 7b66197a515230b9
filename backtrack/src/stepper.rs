//! Bidirectional stepping over [`transition`].
//!
//! Each forward step stores the state it replaced; stepping back restores
//! that state verbatim and truncates the log to the length it had then.
//! Unrecorded steps ([`QueensStepper::auto_step`]) advance in place and share
//! one checkpoint per uninterrupted run, so history stays bounded by the
//! number of manual steps.

use serde_json::json;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::queens::{QueensBoard, QueensError};

use crate::config::QueensConfig;
use crate::engine::{advance, transition, Counters, EngineState, EngineStatus, TrialCell};
use crate::log::{QueensEvent, QueensLog};

/// Engine state plus the log length at the time it was current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueensSnapshot {
    pub state: EngineState,
    pub log_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueensStats {
    pub counters: Counters,
    pub depth: usize,
    pub current_row: usize,
    pub status: EngineStatus,
    /// Snapshots held, including the current one.
    pub history_len: usize,
}

/// Result of [`QueensStepper::run_to_completion`].
#[derive(Debug)]
pub struct QueensReport<'a> {
    pub status: EngineStatus,
    /// The full board when solved.
    pub solution: Option<&'a QueensBoard>,
    pub counters: Counters,
    pub log: &'a QueensLog,
}

#[derive(Debug, Clone)]
pub struct QueensStepper {
    config: QueensConfig,
    current: QueensSnapshot,
    undo: Vec<QueensSnapshot>,
    log: QueensLog,
    /// The current unrecorded run already has its checkpoint on `undo`.
    checkpointed: bool,
}

impl QueensStepper {
    /// # Errors
    ///
    /// [`QueensError::SizeOutOfRange`] for an unsupported board size.
    pub fn new(config: QueensConfig) -> Result<Self, QueensError> {
        config.validate()?;
        let state = EngineState::new(config.n)?;
        let log = QueensLog {
            entries: vec![QueensEvent::Initialized { n: config.n }],
        };
        tracing::debug!(n = config.n, "queens stepper initialized");
        Ok(Self {
            config,
            current: QueensSnapshot {
                state,
                log_len: log.len(),
            },
            undo: Vec::new(),
            log,
            checkpointed: false,
        })
    }

    /// Back to the initial snapshot, dropping all history.
    pub fn reset(&mut self) {
        if let Some(first) = self.undo.first().cloned() {
            self.current = first;
        }
        self.undo.clear();
        self.checkpointed = false;
        self.log.entries.truncate(self.current.log_len);
    }

    /// Apply one transition. Returns the events it emitted, empty once
    /// finished (and then nothing is recorded).
    pub fn next_step(&mut self) -> Vec<QueensEvent> {
        if self.is_done() {
            return Vec::new();
        }
        let (state, events) = transition(&self.current.state);
        self.log.entries.extend(events.iter().copied());
        let previous = std::mem::replace(
            &mut self.current,
            QueensSnapshot {
                state,
                log_len: self.log.len(),
            },
        );
        self.undo.push(previous);
        self.checkpointed = false;
        events
    }

    /// Apply one transition in place without a per-step snapshot.
    ///
    /// The first unrecorded step after a recorded step, an undo, or a reset
    /// stores one checkpoint, so [`Self::previous_step`] returns to where the
    /// run began. Returns the emitted event, if any.
    pub fn auto_step(&mut self) -> Option<QueensEvent> {
        if self.is_done() {
            return None;
        }
        if !self.checkpointed {
            self.undo.push(self.current.clone());
            self.checkpointed = true;
        }
        let event = advance(&mut self.current.state);
        self.log.entries.extend(event);
        self.current.log_len = self.log.len();
        event
    }

    /// Restore the snapshot before the last step. `false` at the initial one.
    pub fn previous_step(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        self.current = previous;
        self.checkpointed = false;
        self.log.entries.truncate(self.current.log_len);
        true
    }

    /// Step until solved or proven unsolvable, as one undoable run.
    pub fn run_to_completion(&mut self) -> QueensReport<'_> {
        while !self.is_done() {
            self.auto_step();
        }
        let status = self.current.state.status;
        QueensReport {
            status,
            solution: match status {
                EngineStatus::Solved => self.current.state.board(),
                EngineStatus::Running | EngineStatus::NoSolution => None,
            },
            counters: self.current.state.counters,
            log: &self.log,
        }
    }

    #[must_use]
    pub fn config(&self) -> QueensConfig {
        self.config
    }

    #[must_use]
    pub fn current(&self) -> &QueensSnapshot {
        &self.current
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.current.state
    }

    #[must_use]
    pub fn board(&self) -> Option<&QueensBoard> {
        self.current.state.board()
    }

    #[must_use]
    pub fn trial(&self) -> Option<TrialCell> {
        self.current.state.trial
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.current.state.status
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.current.state.status.is_finished()
    }

    #[must_use]
    pub fn log(&self) -> &QueensLog {
        &self.log
    }

    #[must_use]
    pub fn stats(&self) -> QueensStats {
        let state = &self.current.state;
        QueensStats {
            counters: state.counters,
            depth: state.depth(),
            current_row: state.current_row(),
            status: state.status,
            history_len: self.undo.len() + 1,
        }
    }

    /// The current snapshot and the visible log as one JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "state": self.current.state.to_json_value(),
            "log_len": self.current.log_len,
            "log": self.log.to_json_value(),
        })
    }

    /// # Errors
    ///
    /// Propagates [`CanonError`]; not expected for values built here.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }
}
