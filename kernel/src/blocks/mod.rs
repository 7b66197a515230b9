//! Blocks World: predicates, the world set, and the operator schema table.
//!
//! Depends on nothing outside this module. The planner crate drives these
//! types; nothing here knows about goal stacks.

pub mod operator;
pub mod predicate;
pub mod scenario;
pub mod world;

pub use operator::{Operator, OperatorError, OperatorName};
pub use predicate::{parse_predicates, Predicate, PredicateKind, PredicateParseError};
pub use scenario::{canonical_scenario, sussman_scenario, Scenario};
pub use world::World;
