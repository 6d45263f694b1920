//! Content result builder

use verity_domain::{ContentResult, StatusCode};

use super::capabilities::{Assertable, HasStatus, media_type_matches};
use crate::context::TestContext;
use crate::failure::{AssertResult, FailureKind, UsageError};
use crate::validators::{Check, equality, pattern, predicate};

/// Asserts on a narrowed content result.
#[derive(Debug, Clone, Copy)]
pub struct ContentBuilder<'a> {
    ctx: &'a TestContext,
    result: &'a ContentResult,
}

impl<'a> ContentBuilder<'a> {
    pub(crate) const fn new(ctx: &'a TestContext, result: &'a ContentResult) -> Self {
        Self { ctx, result }
    }

    /// Asserts the full textual content.
    ///
    /// # Errors
    /// Content failure on mismatch.
    pub fn with_content(self, expected: &str) -> AssertResult<Self> {
        equality::deep_equal(
            "content result content",
            &serde_json::Value::String(expected.to_string()),
            &serde_json::Value::String(self.result.content.clone()),
            |c| self.ctx.fail(FailureKind::Content, c),
        )?;
        Ok(self)
    }

    /// Asserts the content matches a regular expression.
    ///
    /// # Errors
    /// Usage error for a malformed pattern; content failure on mismatch.
    pub fn with_content_matching(self, pat: &str) -> AssertResult<Self> {
        let regex = pattern::compile(pat)?;
        pattern::matching("content result content", &regex, &self.result.content, |c| {
            self.ctx.fail(FailureKind::Content, c)
        })?;
        Ok(self)
    }

    /// Asserts the content passes a boolean predicate.
    ///
    /// # Errors
    /// Content failure when the predicate returns false.
    pub fn with_content_passing(self, pred: impl FnOnce(&str) -> bool) -> AssertResult<Self> {
        predicate::passing(
            "content result content",
            self.result.content.as_str(),
            pred,
            |c| self.ctx.fail(FailureKind::Content, c),
        )?;
        Ok(self)
    }

    /// Runs caller assertions against the content; anything they raise
    /// propagates unmodified.
    pub fn with_content_asserting(self, assertions: impl FnOnce(&str)) -> Self {
        predicate::asserting(self.result.content.as_str(), assertions);
        self
    }

    /// Asserts the content type. Lenient validation compares type/subtype;
    /// strict validation compares the full media type with parameters.
    ///
    /// # Errors
    /// Usage error when the expectation is not a media type; content failure
    /// on mismatch or when no content type was set.
    pub fn with_content_type(self, expected: &str) -> AssertResult<Self> {
        let expected_mime: mime::Mime = expected
            .parse()
            .map_err(|_| UsageError::InvalidExpectation(format!("'{expected}' is not a media type")))?;
        match self.result.content_type.as_deref() {
            Some(actual) if media_type_matches(self.ctx.strict(), &expected_mime, actual) => {
                Ok(self)
            }
            Some(actual) => Err(self.ctx.fail(
                FailureKind::Content,
                Check::new(
                    "content result content type",
                    format!("be '{expected}'"),
                    format!("instead received '{actual}'"),
                ),
            )),
            None => Err(self.ctx.fail(
                FailureKind::Content,
                Check::new(
                    "content result content type",
                    format!("be '{expected}'"),
                    "none was set",
                ),
            )),
        }
    }
}

impl<'a> Assertable<'a> for ContentBuilder<'a> {
    fn context(&self) -> &'a TestContext {
        self.ctx
    }

    fn subject(&self) -> &'static str {
        "content result"
    }
}

impl<'a> HasStatus<'a> for ContentBuilder<'a> {
    fn status(&self) -> StatusCode {
        self.result.status
    }
}
