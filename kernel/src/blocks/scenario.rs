//! Built-in Blocks World scenarios.

use super::predicate::Predicate;
use super::world::World;

/// An initial world paired with a goal conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub initial: World,
    pub goals: Vec<Predicate>,
}

impl Scenario {
    /// Blocks named by the initial world or the goals.
    #[must_use]
    pub fn blocks(&self) -> std::collections::BTreeSet<String> {
        let mut blocks = self.initial.blocks();
        for g in &self.goals {
            blocks.extend(g.args().into_iter().map(str::to_string));
        }
        blocks
    }
}

/// Four blocks: B on A, with A, C and D on the table.
/// Goal: C on A, B on D, everything else clear and the arm empty.
#[must_use]
pub fn canonical_scenario() -> Scenario {
    let initial = [
        Predicate::on("B", "A"),
        Predicate::on_table("A"),
        Predicate::on_table("C"),
        Predicate::on_table("D"),
        Predicate::clear("B"),
        Predicate::clear("C"),
        Predicate::clear("D"),
        Predicate::ArmEmpty,
    ]
    .into_iter()
    .collect();
    let goals = vec![
        Predicate::on("C", "A"),
        Predicate::on("B", "D"),
        Predicate::on_table("A"),
        Predicate::on_table("D"),
        Predicate::clear("B"),
        Predicate::clear("C"),
        Predicate::ArmEmpty,
    ];
    Scenario { initial, goals }
}

/// The Sussman anomaly: C on A, B on the table; goal A on B on C.
#[must_use]
pub fn sussman_scenario() -> Scenario {
    let initial = [
        Predicate::on("C", "A"),
        Predicate::on_table("A"),
        Predicate::on_table("B"),
        Predicate::clear("C"),
        Predicate::clear("B"),
        Predicate::ArmEmpty,
    ]
    .into_iter()
    .collect();
    Scenario {
        initial,
        goals: vec![Predicate::on("A", "B"), Predicate::on("B", "C")],
    }
}
