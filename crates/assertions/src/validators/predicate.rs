//! Predicate validators
//!
//! Two deliberate forms: the boolean *predicate* form converts a `false`
//! return into the library's own failure, while the side-effecting
//! *assertions* form runs the caller's closure and catches nothing, so a
//! user's own assertion failures surface verbatim.

use super::Check;

/// Boolean predicate form.
///
/// Panics raised inside the predicate itself propagate unmodified.
///
/// # Errors
/// Invokes `fail` when the predicate returns `false`.
pub fn passing<T: ?Sized, E>(
    subject: &str,
    actual: &T,
    predicate: impl FnOnce(&T) -> bool,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    if predicate(actual) {
        Ok(())
    } else {
        Err(fail(Check::new(
            subject,
            "pass the given predicate",
            "it did not",
        )))
    }
}

/// Side-effecting assertions form: runs the closure against the actual value
/// and lets anything it raises propagate unmodified.
pub fn asserting<T: ?Sized>(actual: &T, assertions: impl FnOnce(&T)) {
    assertions(actual);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_true_is_ok() {
        assert!(passing("location", "/home", |l| l.starts_with('/'), |c| c).is_ok());
    }

    #[test]
    fn test_passing_false_renders_check() {
        let check = passing("location", "/home", |_| false, |c| c).unwrap_err();
        assert_eq!(check.subject, "location");
        assert_eq!(check.expectation, "pass the given predicate");
        assert_eq!(check.actual, "it did not");
    }

    #[test]
    #[should_panic(expected = "user assertion failed")]
    fn test_asserting_propagates_user_panics() {
        asserting("/home", |_| panic!("user assertion failed"));
    }
}
