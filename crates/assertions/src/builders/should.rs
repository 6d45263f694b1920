//! Chain entry points
//!
//! `ShouldReturn` narrows the captured result to a concrete category with a
//! checked pattern match; the wrong category surfaces as a shape mismatch
//! naming the requested shape, never as an unchecked cast. `ShouldThrow`
//! covers the error path of an invocation.

use verity_domain::ActionResult;

use super::capabilities::{Assertable, StatusPhrase};
use super::content::ContentBuilder;
use super::object::ObjectBuilder;
use super::redirect::RedirectBuilder;
use super::resource::{AcceptedBuilder, CreatedBuilder};
use crate::context::{CapturedError, Outcome, TestContext};
use crate::failure::{AssertResult, FailureKind};
use crate::validators::{Check, equality, pattern, predicate};

/// Narrows the captured result to a concrete category.
#[derive(Debug, Clone, Copy)]
pub struct ShouldReturn<'a> {
    ctx: &'a TestContext,
}

impl<'a> ShouldReturn<'a> {
    pub(crate) const fn new(ctx: &'a TestContext) -> Self {
        Self { ctx }
    }

    fn narrow<T>(
        self,
        requested: &'static str,
        extract: impl FnOnce(&'a ActionResult) -> Option<T>,
    ) -> AssertResult<T> {
        let result = self.ctx.result()?;
        extract(result).ok_or_else(|| {
            self.ctx.fail(
                FailureKind::ResultShape,
                Check::new(
                    "result",
                    format!("be {requested}"),
                    format!("instead received {}", result.kind_name()),
                ),
            )
        })
    }

    /// Narrows to a redirect result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn redirect(self) -> AssertResult<RedirectBuilder<'a>> {
        let result = self.narrow("redirect result", |r| match r {
            ActionResult::Redirect(redirect) => Some(redirect),
            _ => None,
        })?;
        Ok(RedirectBuilder::new(self.ctx, result))
    }

    /// Narrows to a created result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn created(self) -> AssertResult<CreatedBuilder<'a>> {
        let result = self.narrow("created result", |r| match r {
            ActionResult::Created(created) => Some(created),
            _ => None,
        })?;
        Ok(CreatedBuilder::new(self.ctx, result))
    }

    /// Narrows to an accepted result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn accepted(self) -> AssertResult<AcceptedBuilder<'a>> {
        let result = self.narrow("accepted result", |r| match r {
            ActionResult::Accepted(accepted) => Some(accepted),
            _ => None,
        })?;
        Ok(AcceptedBuilder::new(self.ctx, result))
    }

    /// Narrows to a content result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn content(self) -> AssertResult<ContentBuilder<'a>> {
        let result = self.narrow("content result", |r| match r {
            ActionResult::Content(content) => Some(content),
            _ => None,
        })?;
        Ok(ContentBuilder::new(self.ctx, result))
    }

    /// Narrows to an object result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn object(self) -> AssertResult<ObjectBuilder<'a>> {
        let result = self.narrow("object result", |r| match r {
            ActionResult::Object(object) => Some(object),
            _ => None,
        })?;
        Ok(ObjectBuilder::new(self.ctx, result, "object result"))
    }

    /// Narrows to a not found result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn not_found(self) -> AssertResult<ObjectBuilder<'a>> {
        let result = self.narrow("not found result", |r| match r {
            ActionResult::NotFound(object) => Some(object),
            _ => None,
        })?;
        Ok(ObjectBuilder::new(self.ctx, result, "not found result"))
    }

    /// Narrows to a bad request result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn bad_request(self) -> AssertResult<ObjectBuilder<'a>> {
        let result = self.narrow("bad request result", |r| match r {
            ActionResult::BadRequest(object) => Some(object),
            _ => None,
        })?;
        Ok(ObjectBuilder::new(self.ctx, result, "bad request result"))
    }

    /// Asserts the result is a no content result.
    ///
    /// # Errors
    /// Shape failure when the result is of another category.
    pub fn no_content(self) -> AssertResult<()> {
        self.narrow("no content result", |r| match r {
            ActionResult::NoContent => Some(()),
            _ => None,
        })
    }

    /// Narrows to a bare status code result and asserts its code.
    ///
    /// # Errors
    /// Shape failure for another category; status-code failure on mismatch.
    pub fn status_code(self, expected: u16) -> AssertResult<()> {
        let ctx = self.ctx;
        let actual = self.narrow("status code result", |r| match r {
            ActionResult::StatusCode(status) => Some(*status),
            _ => None,
        })?;
        equality::equal(
            "status code result",
            &StatusPhrase(expected.into()),
            &StatusPhrase(actual),
            |c| ctx.fail(FailureKind::StatusCode, c),
        )
    }
}

/// Asserts that the invocation surfaced an error instead of a result.
#[derive(Debug, Clone, Copy)]
pub struct ShouldThrow<'a> {
    ctx: &'a TestContext,
}

impl<'a> ShouldThrow<'a> {
    pub(crate) const fn new(ctx: &'a TestContext) -> Self {
        Self { ctx }
    }

    /// Narrows to the captured error.
    ///
    /// # Errors
    /// Invocation failure when the handler returned a result instead.
    pub fn exception(self) -> AssertResult<ExceptionBuilder<'a>> {
        match self.ctx.outcome()? {
            Outcome::Error(error) => Ok(ExceptionBuilder {
                ctx: self.ctx,
                error,
            }),
            Outcome::Result(result) => Err(self.ctx.fail(
                FailureKind::Invocation,
                Check::new(
                    "action",
                    "throw an exception",
                    format!("instead received {}", result.kind_name()),
                ),
            )),
        }
    }
}

/// Asserts on a captured error's type name and message.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionBuilder<'a> {
    ctx: &'a TestContext,
    error: &'a CapturedError,
}

impl<'a> Assertable<'a> for ExceptionBuilder<'a> {
    fn context(&self) -> &'a TestContext {
        self.ctx
    }

    fn subject(&self) -> &'static str {
        "exception"
    }
}

impl ExceptionBuilder<'_> {
    /// Asserts the error's shortened type name.
    ///
    /// # Errors
    /// Invocation failure on mismatch.
    pub fn named(self, expected: &str) -> AssertResult<Self> {
        let actual = self.error.type_name();
        if actual == expected {
            Ok(self)
        } else {
            Err(self.ctx.fail(
                FailureKind::Invocation,
                Check::new(
                    "exception",
                    format!("be of {expected} type"),
                    format!("instead received {actual}"),
                ),
            ))
        }
    }

    /// Asserts the error's full display message.
    ///
    /// # Errors
    /// Invocation failure on mismatch.
    pub fn with_message(self, expected: &str) -> AssertResult<Self> {
        equality::deep_equal(
            "exception message",
            &serde_json::Value::String(expected.to_string()),
            &serde_json::Value::String(self.error.message().to_string()),
            |c| self.ctx.fail(FailureKind::Invocation, c),
        )?;
        Ok(self)
    }

    /// Asserts the error message contains a fragment.
    ///
    /// # Errors
    /// Invocation failure when the fragment is absent.
    pub fn with_message_containing(self, fragment: &str) -> AssertResult<Self> {
        if self.error.message().contains(fragment) {
            Ok(self)
        } else {
            Err(self.ctx.fail(
                FailureKind::Invocation,
                Check::new(
                    "exception message",
                    format!("contain '{fragment}'"),
                    format!("instead received '{}'", self.error.message()),
                ),
            ))
        }
    }

    /// Asserts the error message matches a regular expression.
    ///
    /// # Errors
    /// Usage error for a malformed pattern; invocation failure on mismatch.
    pub fn with_message_matching(self, pat: &str) -> AssertResult<Self> {
        let regex = pattern::compile(pat)?;
        pattern::matching("exception message", &regex, self.error.message(), |c| {
            self.ctx.fail(FailureKind::Invocation, c)
        })?;
        Ok(self)
    }

    /// Asserts the error message passes a boolean predicate.
    ///
    /// # Errors
    /// Invocation failure when the predicate returns false.
    pub fn with_message_passing(self, pred: impl FnOnce(&str) -> bool) -> AssertResult<Self> {
        predicate::passing("exception message", self.error.message(), pred, |c| {
            self.ctx.fail(FailureKind::Invocation, c)
        })?;
        Ok(self)
    }
}
