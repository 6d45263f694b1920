//! URI validators

use verity_domain::Uri;

use super::Check;

/// Normalizes a location string into a [`Uri`].
///
/// # Errors
/// Invokes `fail` when the input is malformed; callers bind this to the
/// URI-format failure category, distinct from a location mismatch.
pub fn parse<E>(subject: &str, input: &str, fail: impl FnOnce(Check) -> E) -> Result<Uri, E> {
    Uri::parse(input).map_err(|_| {
        fail(Check::new(
            subject,
            "be a well-formed URI",
            format!("'{input}' could not be parsed"),
        ))
    })
}

/// Compares two normalized locations.
///
/// # Errors
/// Invokes `fail` when the locations differ.
pub fn location<E>(
    subject: &str,
    expected: &Uri,
    actual: &Uri,
    fail: impl FnOnce(Check) -> E,
) -> Result<(), E> {
    if expected == actual {
        Ok(())
    } else {
        Err(fail(Check::new(
            subject,
            format!("be '{expected}'"),
            format!("instead received '{actual}'"),
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_uses_format_channel() {
        let check = parse("location", "http://exa mple.com", |c| c).unwrap_err();
        assert_eq!(check.expectation, "be a well-formed URI");
        assert_eq!(check.actual, "'http://exa mple.com' could not be parsed");
    }

    #[test]
    fn test_location_mismatch_quotes_both_sides() {
        let expected = Uri::parse("/other").unwrap();
        let actual = Uri::parse("/home").unwrap();
        let check = location("redirect result location", &expected, &actual, |c| c).unwrap_err();
        assert_eq!(check.expectation, "be '/other'");
        assert_eq!(check.actual, "instead received '/home'");
    }

    #[test]
    fn test_location_reflexive() {
        let uri = Uri::parse("https://example.com/items").unwrap();
        assert!(location("location", &uri, &uri.clone(), |c| c).is_ok());
    }
}
