//! Pattern validators

use regex::Regex;

use super::Check;
use crate::failure::UsageError;

/// Compiles a pattern expectation.
///
/// # Errors
/// Returns [`UsageError::InvalidPattern`] when the pattern is not a valid
/// regular expression; a bad pattern is a malformed test, not a failing
/// system under test.
pub fn compile(pattern: &str) -> Result<Regex, UsageError> {
    Regex::new(pattern).map_err(|e| UsageError::InvalidPattern(e.to_string()))
}

/// Asserts that the actual text matches the compiled pattern.
///
/// # Errors
/// Invokes `fail` when the text does not match.
pub fn matching<E>(
    subject: &str,
    pattern: &Regex,
    actual: &str,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    if pattern.is_match(actual) {
        Ok(())
    } else {
        Err(fail(Check::new(
            subject,
            format!("match '{}'", pattern.as_str()),
            format!("'{actual}' did not"),
        )))
    }
}
