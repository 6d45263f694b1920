//! Failure taxonomy
//!
//! Two distinct signal families: [`AssertionFailure`] means the system under
//! test diverged from the expectation, [`UsageError`] means the test itself
//! is malformed. Both abort the chain at the first failing call.

use thiserror::Error;

/// A failed assertion, one variant per broad result category.
///
/// Every variant carries the fully formatted message; nothing else is meant
/// to be inspected programmatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionFailure {
    /// The captured result is not of the requested category.
    #[error("{0}")]
    ResultShape(String),
    /// Correct shape, wrong status code.
    #[error("{0}")]
    StatusCode(String),
    /// Textual or formatted content mismatch.
    #[error("{0}")]
    Content(String),
    /// Structural payload value mismatch.
    #[error("{0}")]
    Value(String),
    /// Route target or location mismatch.
    #[error("{0}")]
    Route(String),
    /// A location string could not be parsed as a URI.
    #[error("{0}")]
    UriFormat(String),
    /// Response header mismatch.
    #[error("{0}")]
    Header(String),
    /// Response cache or other data-provider mismatch.
    #[error("{0}")]
    DataProvider(String),
    /// Component metadata attribute not found.
    #[error("{0}")]
    Attribute(String),
    /// The invocation itself went a different way than asserted.
    #[error("{0}")]
    Invocation(String),
}

impl AssertionFailure {
    /// The formatted failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ResultShape(m)
            | Self::StatusCode(m)
            | Self::Content(m)
            | Self::Value(m)
            | Self::Route(m)
            | Self::UriFormat(m)
            | Self::Header(m)
            | Self::DataProvider(m)
            | Self::Attribute(m)
            | Self::Invocation(m) => m,
        }
    }
}

/// Selects which [`AssertionFailure`] variant a validator failure becomes.
///
/// Builders bind one of these into the failure callback they hand a
/// validator, so identical comparison logic can surface category-specific
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Result category mismatch.
    ResultShape,
    /// Status code mismatch.
    StatusCode,
    /// Content mismatch.
    Content,
    /// Payload value mismatch.
    Value,
    /// Route or location mismatch.
    Route,
    /// Malformed URI input.
    UriFormat,
    /// Header mismatch.
    Header,
    /// Cache or data-provider mismatch.
    DataProvider,
    /// Missing component attribute.
    Attribute,
    /// Invocation outcome mismatch.
    Invocation,
}

impl FailureKind {
    /// Wraps a formatted message in the matching failure variant.
    #[must_use]
    pub fn wrap(self, message: String) -> AssertionFailure {
        match self {
            Self::ResultShape => AssertionFailure::ResultShape(message),
            Self::StatusCode => AssertionFailure::StatusCode(message),
            Self::Content => AssertionFailure::Content(message),
            Self::Value => AssertionFailure::Value(message),
            Self::Route => AssertionFailure::Route(message),
            Self::UriFormat => AssertionFailure::UriFormat(message),
            Self::Header => AssertionFailure::Header(message),
            Self::DataProvider => AssertionFailure::DataProvider(message),
            Self::Attribute => AssertionFailure::Attribute(message),
            Self::Invocation => AssertionFailure::Invocation(message),
        }
    }
}

/// A malformed test, as opposed to a failing system under test.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// An assertion was made before any handler invocation was captured.
    #[error("a handler invocation must be captured with `calling` before asserting on its result")]
    MissingInvocation,
    /// A cache entry expectation was built without a key.
    #[error("a cache entry expectation requires a key before it can be checked")]
    MissingCacheKey,
    /// A pattern expectation is not a valid regular expression.
    #[error("invalid pattern expectation: {0}")]
    InvalidPattern(String),
    /// An expectation could not be converted to its structural form.
    #[error("invalid expectation: {0}")]
    InvalidExpectation(String),
}

/// Umbrella error for everything a fluent chain can surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// The system under test diverged from the expectation.
    #[error(transparent)]
    Failed(#[from] AssertionFailure),
    /// The test itself is malformed.
    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl AssertionError {
    /// The failed assertion, when this is a test failure.
    #[must_use]
    pub const fn failure(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Usage(_) => None,
        }
    }
}

/// Result type alias returned by every fluent assertion method.
pub type AssertResult<T> = Result<T, AssertionError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wrap() {
        let failure = FailureKind::Route.wrap("message".to_string());
        assert_eq!(failure, AssertionFailure::Route("message".to_string()));
        assert_eq!(failure.message(), "message");
    }

    #[test]
    fn test_umbrella_conversions() {
        let failed: AssertionError = AssertionFailure::Content("c".to_string()).into();
        assert!(failed.failure().is_some());

        let usage: AssertionError = UsageError::MissingInvocation.into();
        assert!(usage.failure().is_none());
        assert_eq!(
            usage.to_string(),
            "a handler invocation must be captured with `calling` before asserting on its result"
        );
    }
}
