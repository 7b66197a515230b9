//! Single-step-resumable A*.
//!
//! Each [`AStarSolver::step`] pops one node. Popping a goal finishes the
//! search; otherwise the node's key is closed and every successor is either
//! skipped (closed, or not cheaper than its open entry) or inserted,
//! replacing any dearer open entry. Closed keys are never reopened.
//!
//! Tie-breaking among equal `f` follows [`FrontierKey`]: shallower depth
//! first, then older node id.

use std::collections::BTreeSet;

use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::frontier::{OpenList, OpenSlot};
use crate::log::{ExpandEvent, SearchLog, SuccessorOutcome, SuccessorRecord, TerminationReason};
use crate::node::SearchNode;
use crate::policy::SearchPolicy;

/// Result of one call to [`AStarSolver::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// A non-goal node was expanded.
    Expanded {
        node_id: u64,
        added: usize,
        message: String,
    },
    /// The search is over. Repeated calls keep returning this.
    Finished {
        reason: TerminationReason,
        message: String,
    },
}

impl SearchStep {
    fn finished(reason: &TerminationReason) -> Self {
        Self::Finished {
            message: reason.message(),
            reason: reason.clone(),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Finished { reason, .. } if reason.is_success())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Expanded { message, .. } | Self::Finished { message, .. } => message,
        }
    }
}

/// One state on a reconstructed solution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep<S> {
    pub node_id: u64,
    pub state: S,
    pub key: String,
    /// `None` for the start state.
    pub action: Option<String>,
    pub g_cost: u64,
    pub h_cost: u64,
}

/// Aggregate result of [`AStarSolver::solve`].
#[derive(Debug)]
pub struct SolveReport<'a, S> {
    pub success: bool,
    /// Start to goal inclusive; empty without a solution.
    pub path: Vec<PathStep<S>>,
    pub nodes_expanded: u64,
    pub termination: TerminationReason,
    pub log: &'a SearchLog,
}

impl<S> SolveReport<'_, S> {
    /// Number of actions on the path (`path.len() - 1`), or `None`.
    #[must_use]
    pub fn moves(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Read-only counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier pops, the goal pop included.
    pub nodes_expanded: u64,
    pub open_size: usize,
    pub closed_size: usize,
    pub open_high_water: u64,
    /// A goal was reached.
    pub completed: bool,
    /// The search has finished for any reason.
    pub done: bool,
    pub solution_length: Option<u32>,
}

/// One open-list entry as shown in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEntryView {
    pub node_id: u64,
    pub key: String,
    pub description: String,
    pub action: Option<String>,
    pub g_cost: u64,
    pub h_cost: u64,
    pub f_cost: u64,
}

/// A* over a [`SearchWorld`], owning its open list, closed set, and log.
pub struct AStarSolver<W: SearchWorld> {
    world: W,
    policy: SearchPolicy,
    nodes: Vec<SearchNode<W::State>>,
    open: OpenList,
    closed: BTreeSet<String>,
    log: SearchLog,
    current: Option<u64>,
    nodes_expanded: u64,
    goal_node: Option<u64>,
}

impl<W: SearchWorld> AStarSolver<W> {
    /// Create a solver seeded with `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn new(world: W, start: W::State, policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        let log = SearchLog::new(world.world_id(), "");
        let mut solver = Self {
            world,
            policy,
            nodes: Vec::new(),
            open: OpenList::new(),
            closed: BTreeSet::new(),
            log,
            current: None,
            nodes_expanded: 0,
            goal_node: None,
        };
        solver.initialize(start);
        Ok(solver)
    }

    /// Reset all search state and seed the open list with `start`
    /// (`g = 0`, `h = heuristic(start)`).
    pub fn initialize(&mut self, start: W::State) {
        let key = self.world.key(&start);
        let h_cost = self.world.heuristic(&start);
        tracing::debug!(world = self.world.world_id(), start = %key, h = h_cost, "astar initialize");

        self.nodes.clear();
        self.open = OpenList::new();
        self.closed.clear();
        self.log = SearchLog::new(self.world.world_id(), &key);
        self.current = None;
        self.nodes_expanded = 0;
        self.goal_node = None;

        let root = SearchNode {
            node_id: 0,
            parent_id: None,
            state: start,
            key,
            depth: 0,
            g_cost: 0,
            h_cost,
            action: None,
        };
        self.open.upsert(
            &root.key,
            OpenSlot {
                node_id: root.node_id,
                g_cost: root.g_cost,
                order: root.frontier_key(),
            },
        );
        self.nodes.push(root);
    }

    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Pop and process one node.
    pub fn step(&mut self) -> SearchStep {
        if let Some(reason) = &self.log.termination {
            return SearchStep::finished(reason);
        }
        if let Some(max) = self.policy.max_expansions {
            if self.nodes_expanded >= max {
                return self.finish(TerminationReason::ExpansionBudgetExceeded {
                    max_expansions: max,
                });
            }
        }
        let Some((key, slot)) = self.open.pop() else {
            return self.finish(TerminationReason::FrontierExhausted);
        };
        let Some(node) = self.node(slot.node_id).cloned() else {
            return self.finish(TerminationReason::FrontierExhausted);
        };
        let SearchNode {
            node_id,
            state,
            depth,
            g_cost,
            h_cost,
            action,
            ..
        } = node;

        self.nodes_expanded += 1;
        self.current = Some(node_id);

        if self.world.is_goal(&state) {
            self.goal_node = Some(node_id);
            let reason = TerminationReason::GoalReached {
                node_id,
                moves: depth,
            };
            self.log.events.push(ExpandEvent {
                step: self.nodes_expanded,
                node_id,
                key,
                g_cost,
                h_cost,
                depth,
                action,
                goal: true,
                successors: Vec::new(),
                open_size: self.open.len(),
                closed_size: self.closed.len(),
                message: reason.message(),
            });
            return self.finish(reason);
        }

        self.closed.insert(key.clone());

        let mut records = Vec::new();
        for succ in self.world.successors(&state) {
            let succ_key = self.world.key(&succ.state);
            let succ_g = g_cost + 1;
            let succ_h = self.world.heuristic(&succ.state);

            let existing = self.open.get(&succ_key).map(|e| e.g_cost);
            let outcome = if self.closed.contains(&succ_key) {
                SuccessorOutcome::SkippedClosed
            } else if let Some(existing_g) = existing.filter(|&eg| eg <= succ_g) {
                SuccessorOutcome::SkippedNotImproved { existing_g }
            } else {
                let child = SearchNode {
                    node_id: self.nodes.len() as u64,
                    parent_id: Some(node_id),
                    state: succ.state,
                    key: succ_key.clone(),
                    depth: depth + 1,
                    g_cost: succ_g,
                    h_cost: succ_h,
                    action: Some(succ.action.clone()),
                };
                let child_id = child.node_id;
                self.open.upsert(
                    &succ_key,
                    OpenSlot {
                        node_id: child_id,
                        g_cost: succ_g,
                        order: child.frontier_key(),
                    },
                );
                self.nodes.push(child);
                match existing {
                    Some(previous_g) => SuccessorOutcome::Replaced {
                        node_id: child_id,
                        previous_g,
                    },
                    None => SuccessorOutcome::Inserted { node_id: child_id },
                }
            };
            records.push(SuccessorRecord {
                key: succ_key,
                action: succ.action,
                g_cost: succ_g,
                h_cost: succ_h,
                outcome,
            });
        }

        let description = self.world.describe(&state);
        let mut event = ExpandEvent {
            step: self.nodes_expanded,
            node_id,
            key,
            g_cost,
            h_cost,
            depth,
            action,
            goal: false,
            successors: records,
            open_size: self.open.len(),
            closed_size: self.closed.len(),
            message: String::new(),
        };
        let added = event.added_count();
        event.message = format!(
            "Expanding state {description} with f={} (g={g_cost}, h={h_cost}). Generated {} successor(s), {added} added to the open list.",
            event.f_cost(),
            event.successors.len(),
        );
        tracing::debug!(
            step = self.nodes_expanded,
            key = %event.key,
            f = event.f_cost(),
            g = g_cost,
            h = h_cost,
            added,
            open = event.open_size,
            "astar expand"
        );
        let message = event.message.clone();
        self.log.events.push(event);

        SearchStep::Expanded {
            node_id,
            added,
            message,
        }
    }

    fn finish(&mut self, reason: TerminationReason) -> SearchStep {
        tracing::info!(
            world = self.world.world_id(),
            expanded = self.nodes_expanded,
            outcome = %reason.message(),
            "astar finished"
        );
        let step = SearchStep::finished(&reason);
        self.log.termination = Some(reason);
        step
    }

    /// Step until finished.
    pub fn solve(&mut self) -> SolveReport<'_, W::State> {
        let termination = loop {
            if let SearchStep::Finished { reason, .. } = self.step() {
                break reason;
            }
        };
        SolveReport {
            success: termination.is_success(),
            path: self.solution_path(),
            nodes_expanded: self.nodes_expanded,
            termination,
            log: &self.log,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.log.termination.is_some()
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes_expanded: self.nodes_expanded,
            open_size: self.open.len(),
            closed_size: self.closed.len(),
            open_high_water: self.open.high_water(),
            completed: self.goal_node.is_some(),
            done: self.is_done(),
            solution_length: self.goal_node.and_then(|id| self.node(id)).map(|n| n.depth),
        }
    }

    /// The best `open_snapshot_limit` open entries in pop order.
    #[must_use]
    pub fn open_snapshot(&self) -> Vec<OpenEntryView> {
        self.open
            .snapshot(self.policy.open_snapshot_limit)
            .into_iter()
            .filter_map(|(_, slot)| self.node(slot.node_id))
            .map(|n| OpenEntryView {
                node_id: n.node_id,
                key: n.key.clone(),
                description: self.world.describe(&n.state),
                action: n.action.clone(),
                g_cost: n.g_cost,
                h_cost: n.h_cost,
                f_cost: n.f_cost(),
            })
            .collect()
    }

    #[must_use]
    pub fn closed_keys(&self) -> &BTreeSet<String> {
        &self.closed
    }

    #[must_use]
    pub fn nodes(&self) -> &[SearchNode<W::State>] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, node_id: u64) -> Option<&SearchNode<W::State>> {
        usize::try_from(node_id).ok().and_then(|i| self.nodes.get(i))
    }

    /// Node popped by the latest step.
    #[must_use]
    pub fn current(&self) -> Option<&SearchNode<W::State>> {
        self.current.and_then(|id| self.node(id))
    }

    #[must_use]
    pub fn log(&self) -> &SearchLog {
        &self.log
    }

    /// Root-to-goal path by parent ids; empty until a goal is reached.
    #[must_use]
    pub fn solution_path(&self) -> Vec<PathStep<W::State>> {
        let mut path = Vec::new();
        let mut cursor = self.goal_node;
        while let Some(node) = cursor.and_then(|id| self.node(id)) {
            path.push(PathStep {
                node_id: node.node_id,
                state: node.state.clone(),
                key: node.key.clone(),
                action: node.action.clone(),
                g_cost: node.g_cost,
                h_cost: node.h_cost,
            });
            cursor = node.parent_id;
        }
        path.reverse();
        path
    }
}
