//! Equality validators

use std::fmt::Display;

use serde_json::Value;
use verity_domain::value;

use super::Check;

/// Ordinary equality for scalar-rendering types.
///
/// # Errors
/// Invokes `fail` with the rendered comparison when the values differ.
pub fn equal<T, E>(
    subject: &str,
    expected: &T,
    actual: &T,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E>
where
    T: PartialEq + Display,
{
    if expected == actual {
        Ok(())
    } else {
        Err(fail(Check::new(
            subject,
            format!("be {expected}"),
            format!("instead received {actual}"),
        )))
    }
}

/// Deep structural equality over structural values.
///
/// Two nulls are equal; null against anything present is not.
///
/// # Errors
/// Invokes `fail` with the rendered comparison when the values differ.
pub fn deep_equal<E>(
    subject: &str,
    expected: &Value,
    actual: &Value,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    if value::deep_equal(expected, actual) {
        Ok(())
    } else {
        Err(fail(Check::new(
            subject,
            format!("be {}", value::describe(expected)),
            format!("instead received {}", value::describe(actual)),
        )))
    }
}
