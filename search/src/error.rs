//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, frontier exhausted, budget hit) are expressed via
//! [`crate::log::TerminationReason`] and always leave a [`crate::SearchLog`].

/// Typed failure for pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy field holds a value the solver cannot run with.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
