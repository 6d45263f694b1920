//! Payload structs for the result categories

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::location::LocationTarget;
use super::status::StatusCode;

/// Pre-formatted textual content with a status and content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResult {
    /// Status code to respond with.
    pub status: StatusCode,
    /// The textual payload.
    pub content: String,
    /// Content type header value, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ContentResult {
    /// Creates a 200 content result.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            content: content.into(),
            content_type: None,
        }
    }

    /// Sets the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusCode>) -> Self {
        self.status = status.into();
        self
    }
}

/// A structured value written through an output formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectResult {
    /// Status code to respond with.
    pub status: StatusCode,
    /// The structural payload, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Content types the formatter may negotiate.
    #[serde(default)]
    pub content_types: Vec<String>,
}

impl ObjectResult {
    /// Creates a 200 object result around a payload value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            value: Some(value),
            content_types: Vec::new(),
        }
    }

    /// Creates an object result with no payload.
    #[must_use]
    pub const fn empty(status: StatusCode) -> Self {
        Self {
            status,
            value: None,
            content_types: Vec::new(),
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusCode>) -> Self {
        self.status = status.into();
        self
    }

    /// Adds a negotiable content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_types.push(content_type.into());
        self
    }
}

/// A redirect to a URL or routed target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectResult {
    /// Whether the redirect is permanent (301/308) or temporary (302/307).
    #[serde(default)]
    pub permanent: bool,
    /// Where the redirect points.
    pub location: LocationTarget,
}

impl RedirectResult {
    /// Creates a temporary redirect to a URL.
    #[must_use]
    pub fn to_url(url: impl Into<String>) -> Self {
        Self {
            permanent: false,
            location: LocationTarget::url(url),
        }
    }

    /// Creates a temporary redirect to a routed target.
    #[must_use]
    pub const fn to_route(location: LocationTarget) -> Self {
        Self {
            permanent: false,
            location,
        }
    }

    /// Marks the redirect permanent.
    #[must_use]
    pub const fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    /// The status code the redirect responds with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        if self.permanent {
            StatusCode::new(301)
        } else {
            StatusCode::new(302)
        }
    }
}

/// A 201 result with an optional location and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResult {
    /// Where the created resource lives, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationTarget>,
    /// The created representation, if returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl CreatedResult {
    /// Creates a created result pointing at a URL.
    #[must_use]
    pub fn at_url(url: impl Into<String>) -> Self {
        Self {
            location: Some(LocationTarget::url(url)),
            value: None,
        }
    }

    /// Creates a created result pointing at a routed target.
    #[must_use]
    pub const fn at_route(location: LocationTarget) -> Self {
        Self {
            location: Some(location),
            value: None,
        }
    }

    /// Creates a created result with no location.
    #[must_use]
    pub const fn bare() -> Self {
        Self {
            location: None,
            value: None,
        }
    }

    /// Attaches the created representation.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// A 202 result with an optional location and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedResult {
    /// Where the eventual resource will live, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationTarget>,
    /// The accepted representation, if returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl AcceptedResult {
    /// Creates an accepted result pointing at a URL.
    #[must_use]
    pub fn at_url(url: impl Into<String>) -> Self {
        Self {
            location: Some(LocationTarget::url(url)),
            value: None,
        }
    }

    /// Creates an accepted result pointing at a routed target.
    #[must_use]
    pub const fn at_route(location: LocationTarget) -> Self {
        Self {
            location: Some(location),
            value: None,
        }
    }

    /// Creates an accepted result with no location.
    #[must_use]
    pub const fn bare() -> Self {
        Self {
            location: None,
            value: None,
        }
    }

    /// Attaches the accepted representation.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}
