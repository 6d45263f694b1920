//! Per-invocation test context
//!
//! A [`TestContext`] records the outcome of exactly one handler invocation
//! plus the metadata every failure message is built from. It is created
//! fresh per invocation, immutable after capture, and consumed sequentially
//! by one chain of builder calls.

use std::error::Error;
use std::sync::OnceLock;

use verity_domain::{ActionResult, Headers, ResponseCache};

use crate::builders::{ShouldHave, ShouldReturn, ShouldThrow};
use crate::failure::{AssertResult, FailureKind, UsageError};
use crate::util::short_type_name;
use crate::validators::Check;

/// An error a handler invocation surfaced, captured by type name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    type_name: String,
    message: String,
}

impl CapturedError {
    /// Captures an error value.
    #[must_use]
    pub fn new<E: Error>(error: &E) -> Self {
        Self {
            type_name: short_type_name::<E>(),
            message: error.to_string(),
        }
    }

    /// The error's shortened type name, e.g. `HandlerError`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The error's display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The outcome of invoking a handler: a result or a surfaced error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The handler returned a result.
    Result(ActionResult),
    /// The handler surfaced an error.
    Error(CapturedError),
}

/// Conversion of handler return shapes into an [`Outcome`].
///
/// Implemented for bare [`ActionResult`] (infallible handlers) and for
/// `Result<ActionResult, E>` where the error is captured by type name and
/// message.
pub trait IntoOutcome {
    /// Converts the handler's return value.
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for ActionResult {
    fn into_outcome(self) -> Outcome {
        Outcome::Result(self)
    }
}

impl<E: Error> IntoOutcome for Result<ActionResult, E> {
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(result) => Outcome::Result(result),
            Err(error) => Outcome::Error(CapturedError::new(&error)),
        }
    }
}

/// Mutable response state a handler writes side effects into while it runs:
/// cache entries and response headers.
#[derive(Debug, Default)]
pub struct ResponseState {
    /// Entries the handler placed in the response cache.
    pub cache: ResponseCache,
    /// Headers the handler set on the response.
    pub headers: Headers,
}

/// The immutable record of one invocation's outcome plus message metadata.
#[derive(Debug)]
pub struct TestContext {
    container: String,
    action: Option<String>,
    outcome: Option<Outcome>,
    cache: ResponseCache,
    headers: Headers,
    attributes: Vec<String>,
    strict: bool,
    prefix: OnceLock<String>,
}

impl TestContext {
    /// Starts a context for a component under test, before any invocation.
    #[must_use]
    pub fn component(name: impl Into<String>) -> Self {
        Self {
            container: name.into(),
            action: None,
            outcome: None,
            cache: ResponseCache::new(),
            headers: Headers::new(),
            attributes: Vec::new(),
            strict: false,
            prefix: OnceLock::new(),
        }
    }

    /// Declares a metadata attribute present on the component under test.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Enables strict media-type validation: content-type assertions compare
    /// the full media type including parameters instead of type/subtype only.
    #[must_use]
    pub const fn with_strict_validation(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Invokes a handler and captures its outcome.
    ///
    /// The handler receives a [`ResponseState`] to write cache entries and
    /// headers into; it may return a bare [`ActionResult`] or a
    /// `Result<ActionResult, E>`.
    #[must_use]
    pub fn calling<F, R>(mut self, action: impl Into<String>, handler: F) -> Self
    where
        F: FnOnce(&mut ResponseState) -> R,
        R: IntoOutcome,
    {
        let mut state = ResponseState::default();
        let outcome = handler(&mut state).into_outcome();
        self.action = Some(action.into());
        self.outcome = Some(outcome);
        self.cache = state.cache;
        self.headers = state.headers;
        self
    }

    /// Begins asserting on the category and content of the returned result.
    #[must_use]
    pub const fn should_return(&self) -> ShouldReturn<'_> {
        ShouldReturn::new(self)
    }

    /// Begins asserting that the invocation surfaced an error.
    #[must_use]
    pub const fn should_throw(&self) -> ShouldThrow<'_> {
        ShouldThrow::new(self)
    }

    /// Begins asserting on invocation side state (cache, headers).
    #[must_use]
    pub const fn should_have(&self) -> ShouldHave<'_> {
        ShouldHave::new(self)
    }

    /// Asserts that the component under test declares a metadata attribute.
    ///
    /// # Errors
    /// Returns an attribute failure when no such attribute was declared.
    pub fn should_have_attribute(&self, attribute: &str) -> AssertResult<&Self> {
        if self.attributes.iter().any(|a| a == attribute) {
            Ok(self)
        } else {
            Err(FailureKind::Attribute
                .wrap(format!(
                    "When testing {} was expected to have {attribute}, but in fact such was not found.",
                    self.container
                ))
                .into())
        }
    }

    /// The memoized message prefix shared by all invocation-scoped failures.
    pub(crate) fn prefix(&self) -> &str {
        self.prefix.get_or_init(|| {
            format!(
                "When calling {} action in {} expected",
                self.action.as_deref().unwrap_or("<none>"),
                self.container
            )
        })
    }

    /// Renders a comparison into the uniform failure message and wraps it in
    /// the requested failure variant.
    pub(crate) fn fail(&self, kind: FailureKind, check: Check) -> crate::failure::AssertionError {
        kind.wrap(format!(
            "{} {} to {}, but {}.",
            self.prefix(),
            check.subject,
            check.expectation,
            check.actual
        ))
        .into()
    }

    /// The captured outcome, or a usage error before any invocation.
    pub(crate) fn outcome(&self) -> Result<&Outcome, UsageError> {
        self.outcome.as_ref().ok_or(UsageError::MissingInvocation)
    }

    /// The captured result, failing when the handler surfaced an error.
    pub(crate) fn result(&self) -> AssertResult<&ActionResult> {
        match self.outcome()? {
            Outcome::Result(result) => Ok(result),
            Outcome::Error(error) => Err(self.fail(
                FailureKind::Invocation,
                Check::new(
                    "action",
                    "complete successfully".to_string(),
                    format!(
                        "it threw {} with '{}' message",
                        error.type_name(),
                        error.message()
                    ),
                ),
            )),
        }
    }

    pub(crate) const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub(crate) const fn headers(&self) -> &Headers {
        &self.headers
    }

    pub(crate) const fn strict(&self) -> bool {
        self.strict
    }
}

/// Shorthand entry point: invokes a handler for a named action in a named
/// component and returns the captured context.
#[must_use]
pub fn calling<F, R>(container: impl Into<String>, action: impl Into<String>, handler: F) -> TestContext
where
    F: FnOnce(&mut ResponseState) -> R,
    R: IntoOutcome,
{
    TestContext::component(container).calling(action, handler)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::failure::{AssertionError, AssertionFailure};
    use verity_domain::RedirectResult;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct HandlerError;

    #[test]
    fn test_prefix_formatting() {
        let ctx = calling("HomeController", "redirect_to_home", |_| {
            ActionResult::Redirect(RedirectResult::to_url("/home"))
        });
        assert_eq!(
            ctx.prefix(),
            "When calling redirect_to_home action in HomeController expected"
        );
    }

    #[test]
    fn test_outcome_before_invocation_is_usage_error() {
        let ctx = TestContext::component("HomeController");
        assert_eq!(ctx.outcome(), Err(UsageError::MissingInvocation));
    }

    #[test]
    fn test_error_outcome_captured_by_type_name() {
        let ctx = calling("HomeController", "explode", |_| {
            Err::<ActionResult, _>(HandlerError)
        });
        let err = ctx.result().unwrap_err();
        assert_eq!(
            err,
            AssertionError::Failed(AssertionFailure::Invocation(
                "When calling explode action in HomeController expected action to \
                 complete successfully, but it threw HandlerError with 'boom' message."
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_attribute_presence() {
        let ctx = TestContext::component("HomeController").with_attribute("Authorize");
        assert!(ctx.should_have_attribute("Authorize").is_ok());

        let err = ctx.should_have_attribute("Route").unwrap_err();
        assert_eq!(
            err,
            AssertionError::Failed(AssertionFailure::Attribute(
                "When testing HomeController was expected to have Route, but in fact \
                 such was not found."
                    .to_string()
            ))
        );
    }
}
