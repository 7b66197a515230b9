//! The world: a set of ground predicates.

use std::collections::BTreeSet;
use std::fmt;

use super::operator::Operator;
use super::predicate::Predicate;

/// A Blocks World state as an ordered set of facts.
///
/// No consistency is enforced; a world may hold `ARMEMPTY` and `HOLDING(X)`
/// at once if a caller builds it that way. Operators only keep it
/// consistent when their preconditions held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct World {
    facts: BTreeSet<Predicate>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn holds(&self, p: &Predicate) -> bool {
        self.facts.contains(p)
    }

    /// Returns `true` if the fact was newly added.
    pub fn insert(&mut self, p: Predicate) -> bool {
        self.facts.insert(p)
    }

    /// Returns `true` if the fact was present.
    pub fn remove(&mut self, p: &Predicate) -> bool {
        self.facts.remove(p)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.facts.iter()
    }

    #[must_use]
    pub fn arm_empty(&self) -> bool {
        self.holds(&Predicate::ArmEmpty)
    }

    /// Block named by the first `HOLDING(X)` fact, if any.
    #[must_use]
    pub fn held_block(&self) -> Option<&str> {
        self.facts.iter().find_map(|p| match p {
            Predicate::Holding(x) => Some(x.as_str()),
            _ => None,
        })
    }

    /// The block `Z` with `ON(Z,x)`, i.e. whatever sits on `x`.
    #[must_use]
    pub fn block_on(&self, x: &str) -> Option<&str> {
        self.facts.iter().find_map(|p| match p {
            Predicate::On(z, below) if below == x => Some(z.as_str()),
            _ => None,
        })
    }

    /// The block `Y` with `ON(x,Y)`, i.e. what `x` rests on.
    #[must_use]
    pub fn support_of(&self, x: &str) -> Option<&str> {
        self.facts.iter().find_map(|p| match p {
            Predicate::On(above, y) if above == x => Some(y.as_str()),
            _ => None,
        })
    }

    /// Every block named by any fact.
    #[must_use]
    pub fn blocks(&self) -> BTreeSet<String> {
        self.facts
            .iter()
            .flat_map(|p| p.args().into_iter().map(str::to_string))
            .collect()
    }

    #[must_use]
    pub fn satisfies_all(&self, goals: &[Predicate]) -> bool {
        goals.iter().all(|g| self.holds(g))
    }

    /// Goals that do not hold, in their given order.
    #[must_use]
    pub fn unsatisfied<'a>(&self, goals: &'a [Predicate]) -> Vec<&'a Predicate> {
        goals.iter().filter(|g| !self.holds(g)).collect()
    }

    /// Apply an operator's effects: deletions first, then additions.
    ///
    /// Preconditions are not checked here.
    pub fn apply(&mut self, op: &Operator) {
        for p in op.delete_effects() {
            self.facts.remove(p);
        }
        for p in op.add_effects() {
            self.facts.insert(p.clone());
        }
    }

    /// Facts rendered in set order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.facts.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<Predicate> for World {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

impl Extend<Predicate> for World {
    fn extend<I: IntoIterator<Item = Predicate>>(&mut self, iter: I) {
        self.facts.extend(iter);
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.to_strings().join(", "))
    }
}
