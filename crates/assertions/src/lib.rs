//! Verity Assertions - Fluent assertion chains over captured handler results
//!
//! This crate is the assertion core of Verity: it captures the outcome of
//! invoking a handler into a [`TestContext`], narrows that outcome through
//! chainable, strongly typed builders, and reports divergences as typed
//! failures with one uniform message shape.
//!
//! ```
//! use verity_assertions::{Assertable, HasLocation, calling};
//! use verity_domain::{ActionResult, RedirectResult};
//!
//! # fn main() -> Result<(), verity_assertions::AssertionError> {
//! calling("HomeController", "redirect_to_home", |_| {
//!     ActionResult::Redirect(RedirectResult::to_url("/home"))
//! })
//! .should_return()
//! .redirect()?
//! .temporary()?
//! .and_also()
//! .to_url("/home")?;
//! # Ok(())
//! # }
//! ```
//!
//! The first failing assertion aborts the chain with an
//! [`AssertionFailure`]; malformed tests surface separately as
//! [`UsageError`]s.

pub mod builders;
pub mod context;
pub mod failure;
pub mod validators;

mod util;

pub use builders::{
    AcceptedBuilder, Assertable, CacheBuilder, CacheEntryExpectation, ContentBuilder,
    CreatedBuilder, ExceptionBuilder, HasLocation, HasStatus, HasValue, HeaderBuilder,
    ObjectBuilder, RedirectBuilder, ShouldHave, ShouldReturn, ShouldThrow,
};
pub use context::{CapturedError, IntoOutcome, Outcome, ResponseState, TestContext, calling};
pub use failure::{AssertResult, AssertionError, AssertionFailure, FailureKind, UsageError};
