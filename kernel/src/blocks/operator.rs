//! Operator schemas and their ground instances.
//!
//! The four schemas live in one static table. Instantiation substitutes the
//! bound blocks for the schema variables `X` and `Y`; nothing else in the
//! crate spells out an operator's effects.

use std::fmt;

use super::predicate::{Predicate, PredicateKind};
use super::world::World;

/// Operator schema names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorName {
    Pickup,
    Putdown,
    Stack,
    Unstack,
}

impl OperatorName {
    pub const ALL: [OperatorName; 4] = [Self::Pickup, Self::Putdown, Self::Stack, Self::Unstack];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "PICKUP",
            Self::Putdown => "PUTDOWN",
            Self::Stack => "STACK",
            Self::Unstack => "UNSTACK",
        }
    }

    #[must_use]
    pub fn arity(self) -> usize {
        schema(self).params.len()
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|n| n.as_str() == upper)
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Var {
    X,
    Y,
}

impl Var {
    const fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

struct Pattern {
    kind: PredicateKind,
    args: &'static [Var],
}

struct Schema {
    params: &'static [Var],
    pre: &'static [Pattern],
    add: &'static [Pattern],
    del: &'static [Pattern],
}

const fn pat(kind: PredicateKind, args: &'static [Var]) -> Pattern {
    Pattern { kind, args }
}

const ON_XY: Pattern = pat(PredicateKind::On, &[Var::X, Var::Y]);
const ONTABLE_X: Pattern = pat(PredicateKind::OnTable, &[Var::X]);
const CLEAR_X: Pattern = pat(PredicateKind::Clear, &[Var::X]);
const CLEAR_Y: Pattern = pat(PredicateKind::Clear, &[Var::Y]);
const HOLDING_X: Pattern = pat(PredicateKind::Holding, &[Var::X]);
const ARMEMPTY: Pattern = pat(PredicateKind::ArmEmpty, &[]);

static PICKUP: Schema = Schema {
    params: &[Var::X],
    pre: &[ONTABLE_X, CLEAR_X, ARMEMPTY],
    add: &[HOLDING_X],
    del: &[ONTABLE_X, CLEAR_X, ARMEMPTY],
};

static PUTDOWN: Schema = Schema {
    params: &[Var::X],
    pre: &[HOLDING_X],
    add: &[ONTABLE_X, CLEAR_X, ARMEMPTY],
    del: &[HOLDING_X],
};

static STACK: Schema = Schema {
    params: &[Var::X, Var::Y],
    pre: &[HOLDING_X, CLEAR_Y],
    add: &[ON_XY, CLEAR_X, ARMEMPTY],
    del: &[HOLDING_X, CLEAR_Y],
};

static UNSTACK: Schema = Schema {
    params: &[Var::X, Var::Y],
    pre: &[ON_XY, CLEAR_X, ARMEMPTY],
    add: &[HOLDING_X, CLEAR_Y],
    del: &[ON_XY, ARMEMPTY],
};

fn schema(name: OperatorName) -> &'static Schema {
    match name {
        OperatorName::Pickup => &PICKUP,
        OperatorName::Putdown => &PUTDOWN,
        OperatorName::Stack => &STACK,
        OperatorName::Unstack => &UNSTACK,
    }
}

fn ground(pattern: &Pattern, x: &str, y: &str) -> Predicate {
    let arg = |i: usize| {
        pattern.args.get(i).map_or_else(String::new, |v| match v {
            Var::X => x.to_string(),
            Var::Y => y.to_string(),
        })
    };
    match pattern.kind {
        PredicateKind::On => Predicate::On(arg(0), arg(1)),
        PredicateKind::OnTable => Predicate::OnTable(arg(0)),
        PredicateKind::Clear => Predicate::Clear(arg(0)),
        PredicateKind::Holding => Predicate::Holding(arg(0)),
        PredicateKind::ArmEmpty => Predicate::ArmEmpty,
    }
}

/// Failure to instantiate an operator from text or a name/argument pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    UnknownOperator { name: String },
    Arity {
        name: OperatorName,
        expected: usize,
        found: usize,
    },
    InvalidBlock { name: String },
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperator { name } => write!(f, "unknown operator: {name:?}"),
            Self::Arity {
                name,
                expected,
                found,
            } => write!(f, "{name} takes {expected} argument(s), got {found}"),
            Self::InvalidBlock { name } => write!(f, "invalid block identifier: {name:?}"),
        }
    }
}

impl std::error::Error for OperatorError {}

/// A ground operator: a schema with its variables bound to blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operator {
    name: OperatorName,
    bindings: Vec<(&'static str, String)>,
    preconditions: Vec<Predicate>,
    add_effects: Vec<Predicate>,
    delete_effects: Vec<Predicate>,
}

impl Operator {
    fn from_schema(name: OperatorName, x: &str, y: &str) -> Self {
        let s = schema(name);
        let bindings = s
            .params
            .iter()
            .map(|v| {
                let block = match v {
                    Var::X => x,
                    Var::Y => y,
                };
                (v.name(), block.to_string())
            })
            .collect();
        let grounded = |ps: &[Pattern]| ps.iter().map(|p| ground(p, x, y)).collect::<Vec<_>>();
        Self {
            name,
            bindings,
            preconditions: grounded(s.pre),
            add_effects: grounded(s.add),
            delete_effects: grounded(s.del),
        }
    }

    #[must_use]
    pub fn pickup(x: &str) -> Self {
        Self::from_schema(OperatorName::Pickup, x, "")
    }

    #[must_use]
    pub fn putdown(x: &str) -> Self {
        Self::from_schema(OperatorName::Putdown, x, "")
    }

    #[must_use]
    pub fn stack(x: &str, y: &str) -> Self {
        Self::from_schema(OperatorName::Stack, x, y)
    }

    #[must_use]
    pub fn unstack(x: &str, y: &str) -> Self {
        Self::from_schema(OperatorName::Unstack, x, y)
    }

    /// Instantiate a schema by name with positional block arguments.
    ///
    /// # Errors
    ///
    /// [`OperatorError::Arity`] on an argument count mismatch,
    /// [`OperatorError::InvalidBlock`] on an empty or non-alphanumeric block.
    pub fn instantiate(name: OperatorName, args: &[&str]) -> Result<Self, OperatorError> {
        let expected = name.arity();
        if args.len() != expected {
            return Err(OperatorError::Arity {
                name,
                expected,
                found: args.len(),
            });
        }
        let mut blocks = Vec::with_capacity(args.len());
        for a in args {
            let b = a.trim();
            if b.is_empty() || !b.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(OperatorError::InvalidBlock {
                    name: b.to_string(),
                });
            }
            blocks.push(b.to_ascii_uppercase());
        }
        let x = blocks.first().map_or("", String::as_str);
        let y = blocks.get(1).map_or("", String::as_str);
        Ok(Self::from_schema(name, x, y))
    }

    #[must_use]
    pub fn name(&self) -> OperatorName {
        self.name
    }

    /// Variable bindings in schema order, e.g. `[("X","B"),("Y","D")]`.
    #[must_use]
    pub fn bindings(&self) -> &[(&'static str, String)] {
        &self.bindings
    }

    #[must_use]
    pub fn preconditions(&self) -> &[Predicate] {
        &self.preconditions
    }

    #[must_use]
    pub fn add_effects(&self) -> &[Predicate] {
        &self.add_effects
    }

    #[must_use]
    pub fn delete_effects(&self) -> &[Predicate] {
        &self.delete_effects
    }

    #[must_use]
    pub fn is_applicable(&self, world: &World) -> bool {
        world.satisfies_all(&self.preconditions)
    }

    /// Preconditions that do not hold in `world`, in schema order.
    #[must_use]
    pub fn unsatisfied_preconditions(&self, world: &World) -> Vec<Predicate> {
        world
            .unsatisfied(&self.preconditions)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<&str> = self.bindings.iter().map(|(_, b)| b.as_str()).collect();
        write!(f, "{}({})", self.name, args.join(","))
    }
}

impl std::str::FromStr for Operator {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, args) = match s.find('(') {
            Some(open) => {
                let inner = s[open + 1..].strip_suffix(')').ok_or_else(|| {
                    OperatorError::UnknownOperator {
                        name: s.to_string(),
                    }
                })?;
                let args: Vec<&str> = inner
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .collect();
                (&s[..open], args)
            }
            None => (s, Vec::new()),
        };
        let name = OperatorName::parse(head).ok_or_else(|| OperatorError::UnknownOperator {
            name: head.trim().to_string(),
        })?;
        Self::instantiate(name, &args)
    }
}
