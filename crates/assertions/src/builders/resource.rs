//! Created and accepted result builders
//!
//! Both categories optionally point at a resource and optionally return its
//! representation, so both get the location and value capabilities. A
//! location-only result makes the action-name assertions fail with a shape
//! mismatch rather than a cast error.

use serde_json::Value;
use verity_domain::{AcceptedResult, CreatedResult, LocationTarget};

use super::capabilities::{Assertable, HasLocation, HasValue};
use crate::context::TestContext;

/// Asserts on a narrowed created result.
#[derive(Debug, Clone, Copy)]
pub struct CreatedBuilder<'a> {
    ctx: &'a TestContext,
    result: &'a CreatedResult,
}

impl<'a> CreatedBuilder<'a> {
    pub(crate) const fn new(ctx: &'a TestContext, result: &'a CreatedResult) -> Self {
        Self { ctx, result }
    }
}

impl<'a> Assertable<'a> for CreatedBuilder<'a> {
    fn context(&self) -> &'a TestContext {
        self.ctx
    }

    fn subject(&self) -> &'static str {
        "created result"
    }
}

impl<'a> HasLocation<'a> for CreatedBuilder<'a> {
    fn location(&self) -> Option<&'a LocationTarget> {
        self.result.location.as_ref()
    }
}

impl<'a> HasValue<'a> for CreatedBuilder<'a> {
    fn value(&self) -> Option<&'a Value> {
        self.result.value.as_ref()
    }
}

/// Asserts on a narrowed accepted result.
#[derive(Debug, Clone, Copy)]
pub struct AcceptedBuilder<'a> {
    ctx: &'a TestContext,
    result: &'a AcceptedResult,
}

impl<'a> AcceptedBuilder<'a> {
    pub(crate) const fn new(ctx: &'a TestContext, result: &'a AcceptedResult) -> Self {
        Self { ctx, result }
    }
}

impl<'a> Assertable<'a> for AcceptedBuilder<'a> {
    fn context(&self) -> &'a TestContext {
        self.ctx
    }

    fn subject(&self) -> &'static str {
        "accepted result"
    }
}

impl<'a> HasLocation<'a> for AcceptedBuilder<'a> {
    fn location(&self) -> Option<&'a LocationTarget> {
        self.result.location.as_ref()
    }
}

impl<'a> HasValue<'a> for AcceptedBuilder<'a> {
    fn value(&self) -> Option<&'a Value> {
        self.result.value.as_ref()
    }
}
