//! Verity Domain - Captured handler-result model
//!
//! This crate defines the data model for the Verity assertion library:
//! the tagged union of results a web handler can produce, plus the
//! collection, cache, and URI types assertions inspect. All types here
//! are pure Rust with no I/O dependencies.

pub mod cache;
pub mod error;
pub mod headers;
pub mod result;
pub mod route_values;
pub mod uri;
pub mod value;

pub use cache::{CacheEntry, ResponseCache};
pub use error::{DomainError, DomainResult};
pub use headers::Headers;
pub use result::{
    AcceptedResult, ActionResult, ContentResult, CreatedResult, LocationTarget, ObjectResult,
    RedirectResult, StatusCode,
};
pub use route_values::RouteValues;
pub use uri::Uri;
