//! Collection validators
//!
//! Keyed collections (route values, headers, cache entries) are validated in
//! one of three policies: *containing* tolerates extra actual entries,
//! *exact* requires matching count and contents (count reported first), and
//! *type-only* requires at least one value assignable to a requested type.
//! Per-shape builders adapt their collection into the `key -> Value` form
//! these validators work over.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use verity_domain::value;

use super::Check;
use crate::util::short_type_name;

/// Exact count check, reported independently of content checks.
///
/// # Errors
/// Invokes `fail` when the counts differ.
pub fn count<E>(
    subject: &str,
    entry_noun: &str,
    expected: usize,
    actual: usize,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    if expected == actual {
        Ok(())
    } else {
        Err(fail(Check::new(
            subject,
            format!("have {expected} {}", pluralize(entry_noun, expected)),
            format!("in fact found {actual}"),
        )))
    }
}

/// The *containing* policy for a single pair: the entry must be present with
/// a deeply equal value; extra actual entries are allowed.
///
/// # Errors
/// Invokes `fail` when the key is missing or its value differs.
pub fn containing_pair<E>(
    subject: &str,
    entry_noun: &str,
    key: &str,
    expected: &Value,
    actual: &BTreeMap<String, Value>,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    match actual.get(key) {
        None => Err(fail(missing_key(subject, entry_noun, key))),
        Some(found) if !value::deep_equal(expected, found) => Err(fail(Check::new(
            subject,
            format!(
                "have {entry_noun} with '{key}' key and {} value",
                value::describe(expected)
            ),
            format!("the value was {}", value::describe(found)),
        ))),
        Some(_) => Ok(()),
    }
}

/// Presence of a key regardless of its value.
///
/// # Errors
/// Invokes `fail` when the key is missing.
pub fn containing_key<E>(
    subject: &str,
    entry_noun: &str,
    key: &str,
    actual: &BTreeMap<String, Value>,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    if actual.contains_key(key) {
        Ok(())
    } else {
        Err(fail(missing_key(subject, entry_noun, key)))
    }
}

/// The *exact* policy: counts must match (reported first), then every
/// expected pair must be present with a deeply equal value.
///
/// # Errors
/// Invokes `fail` with the first divergence.
pub fn exact<E>(
    subject: &str,
    entry_noun: &str,
    expected: &BTreeMap<String, Value>,
    actual: &BTreeMap<String, Value>,
    mut fail: impl FnMut(Check) -> E,
) -> Result<(), E> {
    count(subject, entry_noun, expected.len(), actual.len(), &mut fail)?;
    for (key, expected_value) in expected {
        containing_pair(subject, entry_noun, key, expected_value, actual, &mut fail)?;
    }
    Ok(())
}

/// The *type-only* policy: at least one value (or the value under `key`)
/// must be assignable to `T`, where assignable means it deserializes as `T`.
///
/// # Errors
/// Invokes `fail` when no qualifying value is found.
pub fn of_type<T: DeserializeOwned, E>(
    subject: &str,
    entry_noun: &str,
    key: Option<&str>,
    actual: &BTreeMap<String, Value>,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    let type_name = short_type_name::<T>();
    match key {
        Some(key) => match actual.get(key) {
            Some(found) if assignable::<T>(found) => Ok(()),
            Some(_) | None => Err(fail(Check::new(
                subject,
                format!("have {entry_noun} with '{key}' key of {type_name} type"),
                "such was not found",
            ))),
        },
        None => {
            if actual.values().any(assignable::<T>) {
                Ok(())
            } else {
                Err(fail(Check::new(
                    subject,
                    format!("have at least one {entry_noun} of {type_name} type"),
                    "none was found",
                )))
            }
        }
    }
}

fn assignable<T: DeserializeOwned>(value: &Value) -> bool {
    serde_json::from_value::<T>(value.clone()).is_ok()
}

fn missing_key(subject: &str, entry_noun: &str, key: &str) -> Check {
    Check::new(
        subject,
        format!("have {entry_noun} with '{key}' key"),
        "such was not found",
    )
}

fn pluralize(noun: &str, count: usize) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
