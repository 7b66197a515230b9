//! Blocks World predicates as a closed enum.
//!
//! Text form is `KIND(ARG,ARG)` (e.g. `ON(B,A)`) or a bare `ARMEMPTY`.
//! Kind names and block identifiers are normalised to upper case on parse.

use std::fmt;
use std::str::FromStr;

/// The five predicate kinds of Blocks World.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PredicateKind {
    On,
    OnTable,
    Clear,
    Holding,
    ArmEmpty,
}

impl PredicateKind {
    /// All kinds in declaration order.
    pub const ALL: [PredicateKind; 5] = [
        Self::On,
        Self::OnTable,
        Self::Clear,
        Self::Holding,
        Self::ArmEmpty,
    ];

    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::OnTable => "ONTABLE",
            Self::Clear => "CLEAR",
            Self::Holding => "HOLDING",
            Self::ArmEmpty => "ARMEMPTY",
        }
    }

    /// Number of block arguments.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::On => 2,
            Self::OnTable | Self::Clear | Self::Holding => 1,
            Self::ArmEmpty => 0,
        }
    }

    /// Parse a kind name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|k| k.as_str() == upper)
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ground Blocks World predicate.
///
/// Structural equality is the identity: two predicates with the same kind and
/// arguments are the same fact. `Ord` gives worlds a deterministic iteration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Predicate {
    /// `ON(X,Y)`: block X sits directly on block Y.
    On(String, String),
    /// `ONTABLE(X)`
    OnTable(String),
    /// `CLEAR(X)`: nothing sits on X.
    Clear(String),
    /// `HOLDING(X)`: the arm holds X.
    Holding(String),
    /// `ARMEMPTY`
    ArmEmpty,
}

impl Predicate {
    pub fn on(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::On(x.into(), y.into())
    }

    pub fn on_table(x: impl Into<String>) -> Self {
        Self::OnTable(x.into())
    }

    pub fn clear(x: impl Into<String>) -> Self {
        Self::Clear(x.into())
    }

    pub fn holding(x: impl Into<String>) -> Self {
        Self::Holding(x.into())
    }

    #[must_use]
    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::On(..) => PredicateKind::On,
            Self::OnTable(_) => PredicateKind::OnTable,
            Self::Clear(_) => PredicateKind::Clear,
            Self::Holding(_) => PredicateKind::Holding,
            Self::ArmEmpty => PredicateKind::ArmEmpty,
        }
    }

    /// Block arguments in positional order.
    #[must_use]
    pub fn args(&self) -> Vec<&str> {
        match self {
            Self::On(x, y) => vec![x, y],
            Self::OnTable(x) | Self::Clear(x) | Self::Holding(x) => vec![x],
            Self::ArmEmpty => Vec::new(),
        }
    }

    /// Build a predicate from a kind and already-validated arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateParseError::Arity`] when `args.len()` does not match
    /// the kind, or [`PredicateParseError::InvalidBlock`] for a bad identifier.
    pub fn from_parts(kind: PredicateKind, args: &[&str]) -> Result<Self, PredicateParseError> {
        if args.len() != kind.arity() {
            return Err(PredicateParseError::Arity {
                kind,
                expected: kind.arity(),
                found: args.len(),
            });
        }
        let blocks = args
            .iter()
            .map(|a| normalize_block(a))
            .collect::<Result<Vec<_>, _>>()?;
        let mut it = blocks.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Ok(match kind {
            PredicateKind::On => {
                let x = next();
                let y = next();
                Self::On(x, y)
            }
            PredicateKind::OnTable => Self::OnTable(next()),
            PredicateKind::Clear => Self::Clear(next()),
            PredicateKind::Holding => Self::Holding(next()),
            PredicateKind::ArmEmpty => Self::ArmEmpty,
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArmEmpty => f.write_str("ARMEMPTY"),
            other => write!(f, "{}({})", other.kind(), other.args().join(",")),
        }
    }
}

/// Failure to parse predicate text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateParseError {
    /// Input was empty or whitespace.
    Empty,
    /// Unbalanced parentheses or trailing text.
    Malformed { input: String },
    /// The kind name is not one of the five Blocks World kinds.
    UnknownKind { name: String },
    /// Wrong number of block arguments.
    Arity {
        kind: PredicateKind,
        expected: usize,
        found: usize,
    },
    /// A block identifier is empty or contains characters other than
    /// ASCII letters, digits, and `_`.
    InvalidBlock { name: String },
    /// Wraps another error with its 1-based line number in a multi-line list.
    AtLine {
        line: usize,
        source: Box<PredicateParseError>,
    },
}

impl fmt::Display for PredicateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty predicate"),
            Self::Malformed { input } => write!(f, "malformed predicate: {input:?}"),
            Self::UnknownKind { name } => write!(f, "unknown predicate kind: {name:?}"),
            Self::Arity {
                kind,
                expected,
                found,
            } => write!(f, "{kind} takes {expected} argument(s), got {found}"),
            Self::InvalidBlock { name } => write!(f, "invalid block identifier: {name:?}"),
            Self::AtLine { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl std::error::Error for PredicateParseError {}

fn normalize_block(raw: &str) -> Result<String, PredicateParseError> {
    let name = raw.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(PredicateParseError::InvalidBlock {
            name: name.to_string(),
        });
    }
    Ok(name.to_ascii_uppercase())
}

/// Split `KIND(a,b)` into the kind and its raw argument list.
fn split_call(input: &str) -> Result<(PredicateKind, Vec<&str>), PredicateParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(PredicateParseError::Empty);
    }
    let (name, args) = match s.find('(') {
        None => (s, Vec::new()),
        Some(open) => {
            let Some(inner) = s[open + 1..].strip_suffix(')') else {
                return Err(PredicateParseError::Malformed {
                    input: s.to_string(),
                });
            };
            if inner.contains(['(', ')']) {
                return Err(PredicateParseError::Malformed {
                    input: s.to_string(),
                });
            }
            let args = inner
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .collect();
            (&s[..open], args)
        }
    };
    let kind = PredicateKind::parse(name).ok_or_else(|| PredicateParseError::UnknownKind {
        name: name.trim().to_string(),
    })?;
    Ok((kind, args))
}

impl FromStr for Predicate {
    type Err = PredicateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, args) = split_call(s)?;
        Self::from_parts(kind, &args)
    }
}

/// Parse one predicate expression, expanding the single-argument shorthand
/// `ONTABLE(A,C,D)` into `ONTABLE(A)`, `ONTABLE(C)`, `ONTABLE(D)`.
///
/// # Errors
///
/// Same as [`Predicate::from_str`]; shorthand is only accepted for kinds of
/// arity 1.
pub fn parse_expanded(s: &str) -> Result<Vec<Predicate>, PredicateParseError> {
    let (kind, args) = split_call(s)?;
    if kind.arity() == 1 && args.len() > 1 {
        return args
            .iter()
            .map(|a| Predicate::from_parts(kind, &[a]))
            .collect();
    }
    Predicate::from_parts(kind, &args).map(|p| vec![p])
}

/// Parse a newline-separated predicate list.
///
/// Blank lines and lines starting with `#` are skipped. Shorthand expansion
/// follows [`parse_expanded`].
///
/// # Errors
///
/// Returns the first failure wrapped in [`PredicateParseError::AtLine`].
pub fn parse_predicates(text: &str) -> Result<Vec<Predicate>, PredicateParseError> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = parse_expanded(line).map_err(|e| PredicateParseError::AtLine {
            line: idx + 1,
            source: Box::new(e),
        })?;
        out.extend(parsed);
    }
    Ok(out)
}
