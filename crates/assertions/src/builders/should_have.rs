//! Side-state assertions: response cache and response headers

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::TestContext;
use crate::failure::{AssertResult, FailureKind, UsageError};
use crate::validators::{Check, collections, equality};

/// Narrows to the side state one invocation produced.
#[derive(Debug, Clone, Copy)]
pub struct ShouldHave<'a> {
    ctx: &'a TestContext,
}

impl<'a> ShouldHave<'a> {
    pub(crate) const fn new(ctx: &'a TestContext) -> Self {
        Self { ctx }
    }

    /// Begins asserting on the response cache.
    ///
    /// # Errors
    /// Usage error before any invocation was captured.
    pub fn response_cache(self) -> AssertResult<CacheBuilder<'a>> {
        self.ctx.outcome()?;
        Ok(CacheBuilder { ctx: self.ctx })
    }

    /// Asserts the invocation cached nothing.
    ///
    /// # Errors
    /// Data-provider failure when cache entries exist.
    pub fn no_response_cache(self) -> AssertResult<()> {
        self.ctx.outcome()?;
        let found = self.ctx.cache().len();
        if found == 0 {
            Ok(())
        } else {
            Err(self.ctx.fail(
                FailureKind::DataProvider,
                Check::new(
                    "response cache",
                    "have no entries",
                    format!("in fact found {found}"),
                ),
            ))
        }
    }

    /// Begins asserting on the response headers.
    ///
    /// # Errors
    /// Usage error before any invocation was captured.
    pub fn http_response(self) -> AssertResult<HeaderBuilder<'a>> {
        self.ctx.outcome()?;
        Ok(HeaderBuilder { ctx: self.ctx })
    }
}

/// Asserts on the entries a handler placed in the response cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder<'a> {
    ctx: &'a TestContext,
}

impl CacheBuilder<'_> {
    const SUBJECT: &'static str = "response cache";

    fn entries(&self) -> BTreeMap<String, Value> {
        self.ctx
            .cache()
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Asserts the exact number of cached entries.
    ///
    /// # Errors
    /// Data-provider failure on count mismatch.
    pub fn with_entry_count(self, expected: usize) -> AssertResult<Self> {
        collections::count(
            Self::SUBJECT,
            "entry",
            expected,
            self.ctx.cache().len(),
            |c| self.ctx.fail(FailureKind::DataProvider, c),
        )?;
        Ok(self)
    }

    /// Asserts an entry is present with a deeply equal value; extra entries
    /// are tolerated.
    ///
    /// # Errors
    /// Data-provider failure when the key is missing or the value differs.
    pub fn containing_entry(self, key: &str, expected: Value) -> AssertResult<Self> {
        collections::containing_pair(
            Self::SUBJECT,
            "entry",
            key,
            &expected,
            &self.entries(),
            |c| self.ctx.fail(FailureKind::DataProvider, c),
        )?;
        Ok(self)
    }

    /// Asserts an entry with the given key is present, regardless of value.
    ///
    /// # Errors
    /// Data-provider failure when the key is missing.
    pub fn containing_entry_with_key(self, key: &str) -> AssertResult<Self> {
        collections::containing_key(Self::SUBJECT, "entry", key, &self.entries(), |c| {
            self.ctx.fail(FailureKind::DataProvider, c)
        })?;
        Ok(self)
    }

    /// Asserts the cache matches the given entries exactly: count first,
    /// then key/value contents. The expectation is a map value, e.g.
    /// `json!({"a": 1, "b": 2})`.
    ///
    /// # Errors
    /// Usage error when the expectation is not a map; data-provider failure
    /// on the first divergence.
    pub fn containing_entries(self, expected: Value) -> AssertResult<Self> {
        let Value::Object(expected) = expected else {
            return Err(UsageError::InvalidExpectation(
                "cache entries expectation must be a map".to_string(),
            )
            .into());
        };
        let expected: BTreeMap<String, Value> = expected.into_iter().collect();
        collections::exact(Self::SUBJECT, "entry", &expected, &self.entries(), |c| {
            self.ctx.fail(FailureKind::DataProvider, c)
        })?;
        Ok(self)
    }

    /// Asserts at least one cached value is assignable to `T`.
    ///
    /// # Errors
    /// Data-provider failure when no qualifying value is found.
    pub fn containing_entry_of_type<T: DeserializeOwned>(self) -> AssertResult<Self> {
        collections::of_type::<T, _>(Self::SUBJECT, "entry", None, &self.entries(), |c| {
            self.ctx.fail(FailureKind::DataProvider, c)
        })?;
        Ok(self)
    }

    /// Asserts the value under `key` is assignable to `T`.
    ///
    /// # Errors
    /// Data-provider failure when the key is missing or not assignable.
    pub fn containing_entry_of_type_with_key<T: DeserializeOwned>(
        self,
        key: &str,
    ) -> AssertResult<Self> {
        collections::of_type::<T, _>(Self::SUBJECT, "entry", Some(key), &self.entries(), |c| {
            self.ctx.fail(FailureKind::DataProvider, c)
        })?;
        Ok(self)
    }

    /// Asserts one entry against a full expectation built with
    /// [`CacheEntryExpectation`]. The key is mandatory and must be set
    /// before the expectation can be checked.
    ///
    /// # Errors
    /// [`UsageError::MissingCacheKey`] when the expectation has no key;
    /// data-provider failure on the first diverging property.
    pub fn containing_entry_matching(
        self,
        build: impl FnOnce(CacheEntryExpectation) -> CacheEntryExpectation,
    ) -> AssertResult<Self> {
        let expectation = build(CacheEntryExpectation::new());
        let key = expectation.key.ok_or(UsageError::MissingCacheKey)?;

        let Some(entry) = self.ctx.cache().get(&key) else {
            return Err(self.ctx.fail(
                FailureKind::DataProvider,
                Check::new(
                    Self::SUBJECT,
                    format!("have entry with '{key}' key"),
                    "such was not found",
                ),
            ));
        };

        let subject = format!("response cache entry with '{key}' key");
        if let Some(expected) = expectation.value {
            self.check_property(&subject, "value", &expected, &entry.value)?;
        }
        if let Some(expected) = expectation.duration {
            self.check_property(
                &subject,
                "duration",
                &render_option(Some(expected)),
                &render_option(entry.duration),
            )?;
        }
        if let Some(expected) = expectation.absolute_expiration {
            self.check_property(
                &subject,
                "absolute expiration",
                &render_option(Some(expected)),
                &render_option(entry.absolute_expiration),
            )?;
        }
        if let Some(expected) = expectation.sliding {
            self.check_property(&subject, "sliding", &Value::Bool(expected), &Value::Bool(entry.sliding))?;
        }
        Ok(self)
    }

    fn check_property(
        &self,
        subject: &str,
        property: &str,
        expected: &Value,
        actual: &Value,
    ) -> AssertResult<()> {
        equality::deep_equal(&format!("{subject} {property}"), expected, actual, |c| {
            self.ctx.fail(FailureKind::DataProvider, c)
        })
    }
}

/// A partial cache entry expectation; only the properties that were set are
/// checked. The key is mandatory.
#[derive(Debug, Clone, Default)]
pub struct CacheEntryExpectation {
    key: Option<String>,
    value: Option<Value>,
    duration: Option<Duration>,
    absolute_expiration: Option<DateTime<Utc>>,
    sliding: Option<bool>,
}

impl CacheEntryExpectation {
    /// Creates an empty expectation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key: None,
            value: None,
            duration: None,
            absolute_expiration: None,
            sliding: None,
        }
    }

    /// Sets the mandatory entry key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Expects the cached value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Expects the relative lifetime.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Expects the absolute expiration.
    #[must_use]
    pub const fn with_absolute_expiration(mut self, at: DateTime<Utc>) -> Self {
        self.absolute_expiration = Some(at);
        self
    }

    /// Expects the sliding flag.
    #[must_use]
    pub const fn with_sliding(mut self, sliding: bool) -> Self {
        self.sliding = Some(sliding);
        self
    }
}

fn render_option<T: std::fmt::Display>(value: Option<T>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

/// Asserts on the headers a handler set on the response.
#[derive(Debug, Clone, Copy)]
pub struct HeaderBuilder<'a> {
    ctx: &'a TestContext,
}

impl HeaderBuilder<'_> {
    const SUBJECT: &'static str = "response headers";

    fn entries(&self) -> BTreeMap<String, Value> {
        self.ctx
            .headers()
            .iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                )
            })
            .collect()
    }

    /// Asserts the exact number of distinct header names.
    ///
    /// # Errors
    /// Header failure on count mismatch.
    pub fn with_header_count(self, expected: usize) -> AssertResult<Self> {
        collections::count(
            Self::SUBJECT,
            "header",
            expected,
            self.ctx.headers().len(),
            |c| self.ctx.fail(FailureKind::Header, c),
        )?;
        Ok(self)
    }

    /// Asserts a header with the given name is present.
    ///
    /// # Errors
    /// Header failure when the name is missing.
    pub fn containing_header_named(self, name: &str) -> AssertResult<Self> {
        collections::containing_key(
            Self::SUBJECT,
            "header",
            &name.to_ascii_lowercase(),
            &self.entries(),
            |c| self.ctx.fail(FailureKind::Header, c),
        )?;
        Ok(self)
    }

    /// Asserts a header is present and carries the given value among its
    /// values.
    ///
    /// # Errors
    /// Header failure when the name is missing or the value is absent.
    pub fn containing_header(self, name: &str, value: &str) -> AssertResult<Self> {
        let key = name.to_ascii_lowercase();
        match self.ctx.headers().get(&key) {
            None => Err(self.ctx.fail(
                FailureKind::Header,
                Check::new(
                    Self::SUBJECT,
                    format!("have header with '{key}' key"),
                    "such was not found",
                ),
            )),
            Some(values) if values.iter().any(|v| v == value) => Ok(self),
            Some(values) => Err(self.ctx.fail(
                FailureKind::Header,
                Check::new(
                    Self::SUBJECT,
                    format!("have header with '{key}' key and '{value}' value"),
                    format!("the values were '{}'", values.join("', '")),
                ),
            )),
        }
    }

    /// Asserts a header's full value list, deeply equal and in order.
    ///
    /// # Errors
    /// Header failure when the name is missing or the lists differ.
    pub fn containing_header_with_values(self, name: &str, values: &[&str]) -> AssertResult<Self> {
        let expected = Value::Array(
            values
                .iter()
                .map(|v| Value::String((*v).to_string()))
                .collect(),
        );
        collections::containing_pair(
            Self::SUBJECT,
            "header",
            &name.to_ascii_lowercase(),
            &expected,
            &self.entries(),
            |c| self.ctx.fail(FailureKind::Header, c),
        )?;
        Ok(self)
    }

    /// Asserts the headers match the given map exactly: count first, then
    /// names and value lists. Map values may be a single string or an array
    /// of strings, e.g. `json!({"vary": "Accept", "x-ids": ["1", "2"]})`.
    ///
    /// # Errors
    /// Usage error when the expectation is not a map of strings or string
    /// arrays; header failure on the first divergence.
    pub fn containing_headers(self, expected: Value) -> AssertResult<Self> {
        let Value::Object(expected) = expected else {
            return Err(UsageError::InvalidExpectation(
                "headers expectation must be a map".to_string(),
            )
            .into());
        };
        let mut normalized = BTreeMap::new();
        for (name, value) in expected {
            let values = match value {
                Value::String(single) => Value::Array(vec![Value::String(single)]),
                array @ Value::Array(_) => array,
                other => {
                    return Err(UsageError::InvalidExpectation(format!(
                        "header '{name}' expectation must be a string or string array, got {}",
                        verity_domain::value::kind_of(&other)
                    ))
                    .into());
                }
            };
            normalized.insert(name.to_ascii_lowercase(), values);
        }
        collections::exact(Self::SUBJECT, "header", &normalized, &self.entries(), |c| {
            self.ctx.fail(FailureKind::Header, c)
        })?;
        Ok(self)
    }
}
