//! Builder capabilities
//!
//! Each capability a result shape can offer (a location, a status code, a
//! payload value) is a trait with the full assertion surface as provided
//! methods. Concrete builders implement the small accessor contract and get
//! every overload family for free, always returning the same builder type so
//! chains never lose capabilities. All overload forms of one field normalize
//! to the same comparison primitive, keeping failure messages identical
//! regardless of which form the test used.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use verity_domain::{LocationTarget, RouteValues, StatusCode, Uri, value};

use crate::context::TestContext;
use crate::failure::{AssertResult, FailureKind, UsageError};
use crate::validators::{Check, collections, equality, pattern, predicate, uri};

/// Base capability: access to the invocation context and a friendly subject
/// name for messages. Every builder also gets the `and_also` connective,
/// a no-op that makes chains read as prose.
pub trait Assertable<'a>: Sized {
    /// The invocation context this builder asserts against.
    fn context(&self) -> &'a TestContext;

    /// Friendly name of the result shape, e.g. `redirect result`.
    fn subject(&self) -> &'static str;

    /// Fluency connective; carries no state and performs no checks.
    #[must_use]
    fn and_also(self) -> Self {
        self
    }
}

/// Capability of results that point somewhere: a URL or a routed target.
pub trait HasLocation<'a>: Assertable<'a> {
    /// The captured location, when the result carries one.
    fn location(&self) -> Option<&'a LocationTarget>;

    /// Asserts the location is the given URL, in normalized form.
    ///
    /// # Errors
    /// URI-format failure when either side is malformed; route failure on
    /// mismatch; shape failure when the result has no URL location.
    fn to_url(self, expected: &str) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} location", self.subject());
        let expected = uri::parse(&subject, expected, |c| ctx.fail(FailureKind::UriFormat, c))?;
        let actual = self.location_url()?;
        let actual = uri::parse(&subject, actual, |c| ctx.fail(FailureKind::UriFormat, c))?;
        uri::location(&subject, &expected, &actual, |c| {
            ctx.fail(FailureKind::Route, c)
        })?;
        Ok(self)
    }

    /// Asserts the location against an already normalized [`Uri`].
    ///
    /// # Errors
    /// Same failure surface as [`Self::to_url`].
    fn at_location(self, expected: &Uri) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} location", self.subject());
        let actual = self.location_url()?;
        let actual = uri::parse(&subject, actual, |c| ctx.fail(FailureKind::UriFormat, c))?;
        uri::location(&subject, expected, &actual, |c| {
            ctx.fail(FailureKind::Route, c)
        })?;
        Ok(self)
    }

    /// Asserts the location URL passes a boolean predicate.
    ///
    /// # Errors
    /// Route failure when the predicate returns false.
    fn to_url_passing(self, pred: impl FnOnce(&str) -> bool) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} location", self.subject());
        let actual = self.location_url()?;
        predicate::passing(&subject, actual, pred, |c| ctx.fail(FailureKind::Route, c))?;
        Ok(self)
    }

    /// Runs caller assertions against the location URL; anything they raise
    /// propagates unmodified.
    ///
    /// # Errors
    /// Shape failure when the result has no URL location.
    fn to_url_asserting(self, assertions: impl FnOnce(&str)) -> AssertResult<Self> {
        let actual = self.location_url()?;
        predicate::asserting(actual, assertions);
        Ok(self)
    }

    /// Asserts the location URL matches a regular expression.
    ///
    /// # Errors
    /// Usage error for a malformed pattern; route failure on mismatch.
    fn to_url_matching(self, pat: &str) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} location", self.subject());
        let regex = pattern::compile(pat)?;
        let actual = self.location_url()?;
        pattern::matching(&subject, &regex, actual, |c| ctx.fail(FailureKind::Route, c))?;
        Ok(self)
    }

    /// Asserts the routed target names the given action.
    ///
    /// # Errors
    /// Shape failure when the location carries no action name.
    fn at_action(self, expected: &str) -> AssertResult<Self> {
        let ctx = self.context();
        let location = self.existing_location()?;
        match location.action_name() {
            None => Err(ctx.fail(
                FailureKind::ResultShape,
                Check::new(self.subject(), "contain action name", "it could not be found"),
            )),
            Some(actual) => {
                equality::deep_equal(
                    &format!("{} action name", self.subject()),
                    &Value::String(expected.to_string()),
                    &Value::String(actual.to_string()),
                    |c| ctx.fail(FailureKind::Route, c),
                )?;
                Ok(self)
            }
        }
    }

    /// Asserts the routed target names the given controller.
    ///
    /// # Errors
    /// Shape failure when the location carries no controller name.
    fn at_controller(self, expected: &str) -> AssertResult<Self> {
        let ctx = self.context();
        let location = self.existing_location()?;
        match location.controller_name() {
            None => Err(ctx.fail(
                FailureKind::ResultShape,
                Check::new(
                    self.subject(),
                    "contain controller name",
                    "it could not be found",
                ),
            )),
            Some(actual) => {
                equality::deep_equal(
                    &format!("{} controller name", self.subject()),
                    &Value::String(expected.to_string()),
                    &Value::String(actual.to_string()),
                    |c| ctx.fail(FailureKind::Route, c),
                )?;
                Ok(self)
            }
        }
    }

    /// Asserts one route value is present with a deeply equal value; extra
    /// actual entries are tolerated.
    ///
    /// # Errors
    /// Route failure when the key is missing or the value differs.
    fn containing_route_value(self, key: &str, expected: Value) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} route values", self.subject());
        let actual = self.route_values_map()?;
        collections::containing_pair(&subject, "entry", key, &expected, &actual, |c| {
            ctx.fail(FailureKind::Route, c)
        })?;
        Ok(self)
    }

    /// Asserts the route values match exactly: count first, then contents.
    ///
    /// # Errors
    /// Route failure on the first divergence.
    fn containing_route_values(self, expected: &RouteValues) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} route values", self.subject());
        let expected: BTreeMap<String, Value> = expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let actual = self.route_values_map()?;
        collections::exact(&subject, "entry", &expected, &actual, |c| {
            ctx.fail(FailureKind::Route, c)
        })?;
        Ok(self)
    }

    /// Asserts at least one route value is assignable to `T`.
    ///
    /// # Errors
    /// Route failure when no qualifying value is found.
    fn containing_route_value_of_type<T: DeserializeOwned>(self) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} route values", self.subject());
        let actual = self.route_values_map()?;
        collections::of_type::<T, _>(&subject, "entry", None, &actual, |c| {
            ctx.fail(FailureKind::Route, c)
        })?;
        Ok(self)
    }

    /// Asserts the route value under `key` is assignable to `T`.
    ///
    /// # Errors
    /// Route failure when the key is missing or its value is not assignable.
    fn containing_route_value_of_type_with_key<T: DeserializeOwned>(
        self,
        key: &str,
    ) -> AssertResult<Self> {
        let ctx = self.context();
        let subject = format!("{} route values", self.subject());
        let actual = self.route_values_map()?;
        collections::of_type::<T, _>(&subject, "entry", Some(key), &actual, |c| {
            ctx.fail(FailureKind::Route, c)
        })?;
        Ok(self)
    }

    /// The location, or a shape failure when the result carries none.
    ///
    /// # Errors
    /// Shape failure naming the subject.
    fn existing_location(&self) -> AssertResult<&'a LocationTarget> {
        self.location().ok_or_else(|| {
            self.context().fail(
                FailureKind::ResultShape,
                Check::new(self.subject(), "contain location", "such was not found"),
            )
        })
    }

    /// The location URL, or a shape failure when the location is absent or
    /// is a routed target.
    ///
    /// # Errors
    /// Shape failure naming the subject.
    fn location_url(&self) -> AssertResult<&'a str> {
        let location = self.existing_location()?;
        location.as_url().ok_or_else(|| {
            self.context().fail(
                FailureKind::ResultShape,
                Check::new(
                    self.subject(),
                    "contain location URL",
                    "it was a routed target",
                ),
            )
        })
    }

    /// The route values as the generic keyed form validators work over.
    ///
    /// # Errors
    /// Shape failure when the location is absent or carries no route values.
    fn route_values_map(&self) -> AssertResult<BTreeMap<String, Value>> {
        let location = self.existing_location()?;
        location
            .route_values()
            .map(|values| {
                values
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect()
            })
            .ok_or_else(|| {
                self.context().fail(
                    FailureKind::ResultShape,
                    Check::new(self.subject(), "contain route values", "such were not found"),
                )
            })
    }
}

/// Capability of results that respond with a status code.
pub trait HasStatus<'a>: Assertable<'a> {
    /// The captured status code.
    fn status(&self) -> StatusCode;

    /// Asserts the status code.
    ///
    /// # Errors
    /// Status-code failure on mismatch.
    fn with_status_code(self, expected: u16) -> AssertResult<Self> {
        let ctx = self.context();
        equality::equal(
            &format!("{} status code", self.subject()),
            &StatusPhrase(StatusCode::new(expected)),
            &StatusPhrase(self.status()),
            |c| ctx.fail(FailureKind::StatusCode, c),
        )?;
        Ok(self)
    }
}

/// Capability of results that carry a structural payload value.
pub trait HasValue<'a>: Assertable<'a> {
    /// The captured payload, when the result carries one.
    fn value(&self) -> Option<&'a Value>;

    /// Asserts the payload deeply equals the given value.
    ///
    /// # Errors
    /// Usage error when the expectation cannot be serialized; value failure
    /// on mismatch or when no payload is present.
    fn with_value<T: Serialize>(self, expected: &T) -> AssertResult<Self> {
        let ctx = self.context();
        let expected =
            value::to_value(expected).map_err(|e| UsageError::InvalidExpectation(e.to_string()))?;
        let actual = self.existing_value()?;
        equality::deep_equal(&format!("{} value", self.subject()), &expected, actual, |c| {
            ctx.fail(FailureKind::Value, c)
        })?;
        Ok(self)
    }

    /// Asserts the result carries no payload.
    ///
    /// # Errors
    /// Value failure when a payload is present.
    fn with_no_value(self) -> AssertResult<Self> {
        match self.value() {
            None => Ok(self),
            Some(found) => Err(self.context().fail(
                FailureKind::Value,
                Check::new(
                    self.subject(),
                    "contain no value",
                    format!("one was found: {}", value::describe(found)),
                ),
            )),
        }
    }

    /// Asserts the payload passes a boolean predicate.
    ///
    /// # Errors
    /// Value failure when the predicate returns false.
    fn with_value_passing(self, pred: impl FnOnce(&Value) -> bool) -> AssertResult<Self> {
        let ctx = self.context();
        let actual = self.existing_value()?;
        predicate::passing(&format!("{} value", self.subject()), actual, pred, |c| {
            ctx.fail(FailureKind::Value, c)
        })?;
        Ok(self)
    }

    /// Runs caller assertions against the payload; anything they raise
    /// propagates unmodified.
    ///
    /// # Errors
    /// Value failure when no payload is present.
    fn with_value_asserting(self, assertions: impl FnOnce(&Value)) -> AssertResult<Self> {
        let actual = self.existing_value()?;
        predicate::asserting(actual, assertions);
        Ok(self)
    }

    /// Asserts the payload is assignable to `T`.
    ///
    /// # Errors
    /// Value failure when the payload does not deserialize as `T`.
    fn with_value_of_type<T: DeserializeOwned>(self) -> AssertResult<Self> {
        let ctx = self.context();
        let actual = self.existing_value()?;
        if serde_json::from_value::<T>(actual.clone()).is_ok() {
            Ok(self)
        } else {
            Err(ctx.fail(
                FailureKind::Value,
                Check::new(
                    format!("{} value", self.subject()),
                    format!("be of {} type", crate::util::short_type_name::<T>()),
                    format!("instead received {}", value::kind_of(actual)),
                ),
            ))
        }
    }

    /// The payload, or a value failure when the result carries none.
    ///
    /// # Errors
    /// Value failure naming the subject.
    fn existing_value(&self) -> AssertResult<&'a Value> {
        self.value().ok_or_else(|| {
            self.context().fail(
                FailureKind::Value,
                Check::new(self.subject(), "contain a value", "none was found"),
            )
        })
    }
}

/// Status code rendered with its reason phrase, e.g. `201 (Created)`.
pub(crate) struct StatusPhrase(pub(crate) StatusCode);

impl PartialEq for StatusPhrase {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for StatusPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.0.reason_phrase())
    }
}

/// Media-type comparison honoring the context's strictness: lenient compares
/// type/subtype only, strict compares the full media type with parameters.
pub(crate) fn media_type_matches(strict: bool, expected: &mime::Mime, actual: &str) -> bool {
    actual.parse::<mime::Mime>().map_or_else(
        |_| actual.eq_ignore_ascii_case(expected.as_ref()),
        |actual| {
            if strict {
                actual == *expected
            } else {
                actual.essence_str() == expected.essence_str()
            }
        },
    )
}
