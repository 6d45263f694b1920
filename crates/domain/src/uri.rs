//! URI normalization for location assertions

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// A normalized location, absolute or relative.
///
/// Location expectations arrive as strings in both absolute and relative
/// form; parsing both sides through here guarantees one canonical comparison
/// regardless of which overload supplied the expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Uri {
    /// A fully qualified URL.
    Absolute(Url),
    /// A relative path, with optional query and fragment.
    Relative(String),
}

impl Uri {
    /// Parses a location string.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidUri`] when the input is neither a valid
    /// absolute URL nor a well-formed relative reference.
    pub fn parse(input: &str) -> DomainResult<Self> {
        match Url::parse(input) {
            Ok(url) => Ok(Self::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                if input.is_empty()
                    || input.chars().any(|c| c.is_whitespace() || c.is_control())
                {
                    Err(DomainError::InvalidUri(input.to_string()))
                } else {
                    Ok(Self::Relative(input.to_string()))
                }
            }
            Err(_) => Err(DomainError::InvalidUri(input.to_string())),
        }
    }

    /// Returns true if the location is absolute.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(url) => write!(f, "{url}"),
            Self::Relative(path) => write!(f, "{path}"),
        }
    }
}
