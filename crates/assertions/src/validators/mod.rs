//! Stateless comparison validators
//!
//! Each validator compares an actual value against an expectation and, on
//! divergence, invokes a caller-supplied failure callback with a [`Check`]
//! describing what was checked, what was expected, and what was found. The
//! callback produces the error, so every builder can plug in its own failure
//! category and invocation-scoped message prefix while the comparison logic
//! stays shared.

pub mod collections;
pub mod equality;
pub mod pattern;
pub mod predicate;
pub mod uri;

/// The ephemeral comparison unit a failed validation is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// What was being checked, e.g. `redirect result location`.
    pub subject: String,
    /// The expectation phrase, e.g. `be '/other'`.
    pub expectation: String,
    /// The actual-outcome phrase, e.g. `instead received '/home'`.
    pub actual: String,
}

impl Check {
    /// Creates a comparison unit.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        expectation: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            expectation: expectation.into(),
            actual: actual.into(),
        }
    }
}
