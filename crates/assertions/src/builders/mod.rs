//! Chainable test builders
//!
//! Builders wrap one invocation's [`TestContext`](crate::context::TestContext)
//! and narrow its captured result step by step. Each fluent method validates,
//! then returns the same builder so more assertions can follow; the first
//! failure aborts the chain through `?`.

mod capabilities;
mod content;
mod object;
mod redirect;
mod resource;
mod should;
mod should_have;

pub use capabilities::{Assertable, HasLocation, HasStatus, HasValue};
pub use content::ContentBuilder;
pub use object::ObjectBuilder;
pub use redirect::RedirectBuilder;
pub use resource::{AcceptedBuilder, CreatedBuilder};
pub use should::{ExceptionBuilder, ShouldReturn, ShouldThrow};
pub use should_have::{CacheBuilder, CacheEntryExpectation, HeaderBuilder, ShouldHave};
