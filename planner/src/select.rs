//! Operator selection, keyed by goal predicate kind.
//!
//! Selection is a pure function of the goal and the world. Matching is
//! exhaustive over [`Predicate`], so a new predicate kind fails to compile
//! here until it has a rule.

use waypoint_kernel::blocks::{Operator, Predicate, World};

/// What the planner should do with an unsatisfied goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Push this operator, then its preconditions.
    Operator(Operator),
    /// Re-push the goal, then these subgoals (first is processed first).
    Subgoals(Vec<Predicate>),
    /// Nothing sits on the block and nothing holds it: add `CLEAR(block)`.
    InferClear(String),
    /// No rule applies in this world.
    Unachievable,
}

/// Forward-mode rules. `goal` is assumed not to hold in `world`.
///
/// - `ON(X,Y)`: `STACK(X,Y)`.
/// - `CLEAR(X)`: `UNSTACK(Z,X)` if `ON(Z,X)`; `PUTDOWN(X)` if `X` is held;
///   otherwise infer it.
/// - `HOLDING(X)`: `PICKUP(X)` when `X` is on the table, clear, and the arm
///   is empty; `UNSTACK(X,Y)` when `ON(X,Y)` under the same conditions;
///   otherwise the missing `ARMEMPTY` then `CLEAR(X)` as subgoals.
/// - `ARMEMPTY`: `PUTDOWN` of the held block.
/// - `ONTABLE(X)`: `PUTDOWN(X)`; its `HOLDING(X)` precondition regresses to
///   `UNSTACK(X,Y)` when `X` is stacked.
#[must_use]
pub fn select_forward(goal: &Predicate, world: &World) -> Selection {
    match goal {
        Predicate::On(x, y) => Selection::Operator(Operator::stack(x, y)),
        Predicate::Clear(x) => {
            if let Some(z) = world.block_on(x) {
                Selection::Operator(Operator::unstack(z, x))
            } else if world.holds(&Predicate::holding(x.as_str())) {
                Selection::Operator(Operator::putdown(x))
            } else {
                Selection::InferClear(x.clone())
            }
        }
        Predicate::Holding(x) => {
            let arm_empty = world.arm_empty();
            let clear = world.holds(&Predicate::clear(x.as_str()));
            if arm_empty && clear && world.holds(&Predicate::on_table(x.as_str())) {
                return Selection::Operator(Operator::pickup(x));
            }
            if arm_empty && clear {
                if let Some(y) = world.support_of(x) {
                    return Selection::Operator(Operator::unstack(x, y));
                }
            }
            let mut subgoals = Vec::new();
            if !arm_empty {
                subgoals.push(Predicate::ArmEmpty);
            }
            if !clear {
                subgoals.push(Predicate::clear(x.as_str()));
            }
            if subgoals.is_empty() {
                Selection::Unachievable
            } else {
                Selection::Subgoals(subgoals)
            }
        }
        Predicate::ArmEmpty => match world.held_block() {
            Some(b) => Selection::Operator(Operator::putdown(b)),
            None => Selection::Unachievable,
        },
        Predicate::OnTable(x) => Selection::Operator(Operator::putdown(x)),
    }
}

/// Regression-mode rules: always name an operator when one exists, without
/// checking whether it is applicable yet.
///
/// - `ON(X,Y)`: `STACK(X,Y)`.
/// - `CLEAR(X)`: `UNSTACK(Z,X)` if `ON(Z,X)`.
/// - `HOLDING(X)`: `UNSTACK(X,Y)` if `ON(X,Y)`, else `PICKUP(X)`.
/// - `ARMEMPTY`: `PUTDOWN` of the held block.
/// - `ONTABLE(X)`: `UNSTACK(X,Y)` if `ON(X,Y)`, else `PUTDOWN(X)`.
#[must_use]
pub fn select_regression(goal: &Predicate, world: &World) -> Selection {
    let op = match goal {
        Predicate::On(x, y) => Some(Operator::stack(x, y)),
        Predicate::Clear(x) => world.block_on(x).map(|z| Operator::unstack(z, x)),
        Predicate::Holding(x) => Some(
            world
                .support_of(x)
                .map_or_else(|| Operator::pickup(x), |y| Operator::unstack(x, y)),
        ),
        Predicate::ArmEmpty => world.held_block().map(Operator::putdown),
        Predicate::OnTable(x) => Some(
            world
                .support_of(x)
                .map_or_else(|| Operator::putdown(x), |y| Operator::unstack(x, y)),
        ),
    };
    op.map_or(Selection::Unachievable, Selection::Operator)
}
