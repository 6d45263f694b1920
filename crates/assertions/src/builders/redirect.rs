//! Redirect result builder

use verity_domain::{LocationTarget, RedirectResult};

use super::capabilities::{Assertable, HasLocation};
use crate::context::TestContext;
use crate::failure::{AssertResult, FailureKind};
use crate::validators::Check;

/// Asserts on a narrowed redirect result.
#[derive(Debug, Clone, Copy)]
pub struct RedirectBuilder<'a> {
    ctx: &'a TestContext,
    result: &'a RedirectResult,
}

impl<'a> RedirectBuilder<'a> {
    pub(crate) const fn new(ctx: &'a TestContext, result: &'a RedirectResult) -> Self {
        Self { ctx, result }
    }

    /// Asserts the redirect is permanent (301/308).
    ///
    /// # Errors
    /// Status-code failure when the redirect is temporary.
    pub fn permanent(self) -> AssertResult<Self> {
        if self.result.permanent {
            Ok(self)
        } else {
            Err(self.ctx.fail(
                FailureKind::StatusCode,
                Check::new("redirect result", "be permanent", "it was temporary"),
            ))
        }
    }

    /// Asserts the redirect is temporary (302/307).
    ///
    /// # Errors
    /// Status-code failure when the redirect is permanent.
    pub fn temporary(self) -> AssertResult<Self> {
        if self.result.permanent {
            Err(self.ctx.fail(
                FailureKind::StatusCode,
                Check::new("redirect result", "be temporary", "it was permanent"),
            ))
        } else {
            Ok(self)
        }
    }
}

impl<'a> Assertable<'a> for RedirectBuilder<'a> {
    fn context(&self) -> &'a TestContext {
        self.ctx
    }

    fn subject(&self) -> &'static str {
        "redirect result"
    }
}

impl<'a> HasLocation<'a> for RedirectBuilder<'a> {
    fn location(&self) -> Option<&'a LocationTarget> {
        Some(&self.result.location)
    }
}
