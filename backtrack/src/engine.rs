//! The pure transition function and the state it maps.

use serde_json::json;
use waypoint_kernel::queens::{QueensBoard, QueensError};

use crate::log::QueensEvent;

/// Which half of a column trial the top frame is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Pick the next column, or backtrack when the row is exhausted.
    PrepareTry,
    /// Check the marked cell and place or reject.
    ResolveTry,
    /// Clear the rejected trial and advance the column.
    PostConflict,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrepareTry => "prepare_try",
            Self::ResolveTry => "resolve_try",
            Self::PostConflict => "post_conflict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    Running,
    Solved,
    NoSolution,
}

impl EngineStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Solved => "solved",
            Self::NoSolution => "no_solution",
        }
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// One level of simulated recursion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pub row: usize,
    /// Column under trial, or next to try.
    pub col: usize,
    /// Board on entry to this row.
    pub board: QueensBoard,
    /// Placement in the parent row that created this frame; `None` at the root.
    pub placement: Option<(usize, usize)>,
}

/// The cell currently marked for a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrialCell {
    pub row: usize,
    pub col: usize,
    /// Set once the cell has been rejected.
    pub conflict: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counters {
    pub transitions: u64,
    pub backtracks: u64,
    pub placements: u64,
    pub conflicts: u64,
}

/// Everything [`transition`] reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineState {
    pub n: usize,
    pub frames: Vec<Frame>,
    pub phase: Phase,
    pub status: EngineStatus,
    pub trial: Option<TrialCell>,
    pub counters: Counters,
}

impl EngineState {
    /// A root frame for row 0 on an empty board.
    ///
    /// # Errors
    ///
    /// [`QueensError::SizeOutOfRange`] for an unsupported `n`.
    pub fn new(n: usize) -> Result<Self, QueensError> {
        Ok(Self {
            n,
            frames: vec![Frame {
                row: 0,
                col: 0,
                board: QueensBoard::new(n)?,
                placement: None,
            }],
            phase: Phase::PrepareTry,
            status: EngineStatus::Running,
            trial: None,
            counters: Counters::default(),
        })
    }

    /// Board of the top frame: every queen currently placed.
    #[must_use]
    pub fn board(&self) -> Option<&QueensBoard> {
        self.frames.last().map(|f| &f.board)
    }

    /// Row the top frame is working on.
    #[must_use]
    pub fn current_row(&self) -> usize {
        self.frames.last().map_or(0, |f| f.row)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let frames: Vec<serde_json::Value> = self
            .frames
            .iter()
            .map(|f| {
                json!({
                    "row": f.row,
                    "col": f.col,
                    "queens": f.board.queens().iter().map(|&(r, c)| json!([r, c])).collect::<Vec<_>>(),
                    "placement": f.placement.map(|(r, c)| json!([r, c])),
                })
            })
            .collect();
        json!({
            "n": self.n,
            "phase": self.phase.as_str(),
            "status": self.status.as_str(),
            "trial": self.trial.map(|t| json!({"row": t.row, "col": t.col, "conflict": t.conflict})),
            "frames": frames,
            "counters": {
                "transitions": self.counters.transitions,
                "backtracks": self.counters.backtracks,
                "placements": self.counters.placements,
                "conflicts": self.counters.conflicts,
            },
        })
    }
}

/// Advance by one micro-step.
///
/// A finished state maps to itself with no events. Otherwise
/// `counters.transitions` grows by one and one event is emitted, except when
/// leaving a conflict, which only clears the trial and moves the column on.
/// A top frame at row `n` is a full solution regardless of phase.
#[must_use]
pub fn transition(state: &EngineState) -> (EngineState, Vec<QueensEvent>) {
    let mut next = state.clone();
    let events = advance(&mut next).into_iter().collect();
    (next, events)
}

/// [`transition`] applied in place: the same micro-step, without copying
/// the frame stack. Returns the emitted event, if any.
pub fn advance(state: &mut EngineState) -> Option<QueensEvent> {
    if state.status.is_finished() {
        return None;
    }
    let event = step_in_place(state)?;
    if event.is_terminal() {
        tracing::info!(
            n = state.n,
            status = state.status.as_str(),
            transitions = state.counters.transitions,
            backtracks = state.counters.backtracks,
            "queens finished"
        );
    } else {
        tracing::debug!(
            transition = state.counters.transitions,
            event = event.as_str(),
            depth = state.frames.len(),
            "queens transition"
        );
    }
    Some(event)
}

fn step_in_place(state: &mut EngineState) -> Option<QueensEvent> {
    let n = state.n;
    let depth = state.frames.len();
    let Some(top) = state.frames.last_mut() else {
        state.status = EngineStatus::NoSolution;
        return Some(QueensEvent::NoSolution);
    };
    state.counters.transitions += 1;

    if top.row == n {
        state.status = EngineStatus::Solved;
        state.trial = None;
        return Some(QueensEvent::Solved);
    }
    let event = match state.phase {
        Phase::PrepareTry if top.col < n => {
            state.trial = Some(TrialCell {
                row: top.row,
                col: top.col,
                conflict: false,
            });
            state.phase = Phase::ResolveTry;
            QueensEvent::Trying {
                row: top.row,
                col: top.col,
            }
        }
        Phase::PrepareTry if depth == 1 => {
            state.status = EngineStatus::NoSolution;
            state.trial = None;
            QueensEvent::NoSolution
        }
        Phase::PrepareTry => {
            let child_placement = top.placement;
            state.frames.pop();
            state.counters.backtracks += 1;
            state.trial = None;
            match state.frames.last_mut() {
                Some(parent) => {
                    let (row, col) = child_placement.unwrap_or((parent.row, parent.col));
                    parent.col = col + 1;
                    QueensEvent::Backtracked { row, col }
                }
                None => {
                    state.status = EngineStatus::NoSolution;
                    QueensEvent::NoSolution
                }
            }
        }
        Phase::ResolveTry => {
            let (row, col) = (top.row, top.col);
            match top.board.attacker(row, col) {
                None => {
                    let mut board = top.board.clone();
                    if board.place(row, col).is_err() {
                        state.status = EngineStatus::NoSolution;
                        return Some(QueensEvent::NoSolution);
                    }
                    state.frames.push(Frame {
                        row: row + 1,
                        col: 0,
                        board,
                        placement: Some((row, col)),
                    });
                    state.counters.placements += 1;
                    state.trial = None;
                    state.phase = Phase::PrepareTry;
                    QueensEvent::Placed { row, col }
                }
                Some(attacker) => {
                    state.counters.conflicts += 1;
                    state.trial = Some(TrialCell {
                        row,
                        col,
                        conflict: true,
                    });
                    state.phase = Phase::PostConflict;
                    QueensEvent::Conflict { row, col, attacker }
                }
            }
        }
        Phase::PostConflict => {
            top.col += 1;
            state.trial = None;
            state.phase = Phase::PrepareTry;
            return None;
        }
    };
    Some(event)
}
