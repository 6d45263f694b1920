//! Captured handler results.
//!
//! `ActionResult` is a tagged union of the result categories a handler can
//! produce. Assertion builders narrow it with checked pattern matches, so a
//! wrong category surfaces as a descriptive shape mismatch rather than a
//! failed cast.

mod location;
mod payloads;
mod status;

use serde::{Deserialize, Serialize};

pub use location::LocationTarget;
pub use payloads::{AcceptedResult, ContentResult, CreatedResult, ObjectResult, RedirectResult};
pub use status::StatusCode;

/// One handler invocation's captured result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionResult {
    /// A bare status code.
    StatusCode(StatusCode),
    /// 204 with no payload.
    NoContent,
    /// Pre-formatted textual content.
    Content(ContentResult),
    /// A value to be written through an output formatter.
    Object(ObjectResult),
    /// A redirect to a URL or routed target.
    Redirect(RedirectResult),
    /// 201 with an optional location and payload.
    Created(CreatedResult),
    /// 202 with an optional location and payload.
    Accepted(AcceptedResult),
    /// 404, optionally carrying a payload.
    NotFound(ObjectResult),
    /// 400, optionally carrying error details.
    BadRequest(ObjectResult),
}

impl ActionResult {
    /// Friendly name of this result's category, as used in failure messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::StatusCode(_) => "status code result",
            Self::NoContent => "no content result",
            Self::Content(_) => "content result",
            Self::Object(_) => "object result",
            Self::Redirect(_) => "redirect result",
            Self::Created(_) => "created result",
            Self::Accepted(_) => "accepted result",
            Self::NotFound(_) => "not found result",
            Self::BadRequest(_) => "bad request result",
        }
    }

    /// The status code this result responds with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::StatusCode(status) => *status,
            Self::NoContent => StatusCode::NO_CONTENT,
            Self::Content(content) => content.status,
            Self::Object(object) => object.status,
            Self::Redirect(redirect) => redirect.status(),
            Self::Created(_) => StatusCode::CREATED,
            Self::Accepted(_) => StatusCode::ACCEPTED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let result = ActionResult::Redirect(RedirectResult::to_url("/home"));
        assert_eq!(result.kind_name(), "redirect result");
        assert_eq!(ActionResult::NoContent.kind_name(), "no content result");
    }

    #[test]
    fn test_statuses() {
        assert_eq!(
            ActionResult::Created(CreatedResult::at_url("/items/1")).status(),
            StatusCode::CREATED
        );
        assert_eq!(ActionResult::NoContent.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            ActionResult::Redirect(RedirectResult::to_url("/home").permanent()).status(),
            StatusCode::new(301)
        );
    }
}
