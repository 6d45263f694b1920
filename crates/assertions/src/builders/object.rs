//! Object result builder
//!
//! Also serves the not found and bad request categories, which carry the
//! same payload shape under a different subject name.

use serde_json::Value;
use verity_domain::{ObjectResult, StatusCode};

use super::capabilities::{Assertable, HasStatus, HasValue, media_type_matches};
use crate::context::TestContext;
use crate::failure::{AssertResult, FailureKind, UsageError};
use crate::validators::Check;

/// Asserts on a narrowed object-bearing result.
#[derive(Debug, Clone, Copy)]
pub struct ObjectBuilder<'a> {
    ctx: &'a TestContext,
    result: &'a ObjectResult,
    subject: &'static str,
}

impl<'a> ObjectBuilder<'a> {
    pub(crate) const fn new(
        ctx: &'a TestContext,
        result: &'a ObjectResult,
        subject: &'static str,
    ) -> Self {
        Self {
            ctx,
            result,
            subject,
        }
    }

    /// Asserts the result can negotiate the given content type. Lenient
    /// validation compares type/subtype; strict compares the full media type.
    ///
    /// # Errors
    /// Usage error when the expectation is not a media type; content failure
    /// when no negotiable content type matches.
    pub fn containing_content_type(self, expected: &str) -> AssertResult<Self> {
        let expected_mime: mime::Mime = expected
            .parse()
            .map_err(|_| UsageError::InvalidExpectation(format!("'{expected}' is not a media type")))?;
        if self
            .result
            .content_types
            .iter()
            .any(|actual| media_type_matches(self.ctx.strict(), &expected_mime, actual))
        {
            Ok(self)
        } else {
            let found = if self.result.content_types.is_empty() {
                "none were set".to_string()
            } else {
                format!("in fact found '{}'", self.result.content_types.join("', '"))
            };
            Err(self.ctx.fail(
                FailureKind::Content,
                Check::new(
                    format!("{} content types", self.subject),
                    format!("contain '{expected}'"),
                    found,
                ),
            ))
        }
    }
}

impl<'a> Assertable<'a> for ObjectBuilder<'a> {
    fn context(&self) -> &'a TestContext {
        self.ctx
    }

    fn subject(&self) -> &'static str {
        self.subject
    }
}

impl<'a> HasStatus<'a> for ObjectBuilder<'a> {
    fn status(&self) -> StatusCode {
        self.result.status
    }
}

impl<'a> HasValue<'a> for ObjectBuilder<'a> {
    fn value(&self) -> Option<&'a Value> {
        self.result.value.as_ref()
    }
}
