//! Typed property access.
//!
//! [`PropertyContext`] binds a resolver to an owner and exposes one accessor
//! per supported target type. `None` plays the role of a null wrapper value;
//! callers wanting primitive-zero semantics chain `unwrap_or_default()`.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use num_bigint::{BigInt, ToBigInt};
use serde_json::{Map, Value};

use super::resolver::PropertyResolver;
use super::request::{Owner, Property};
use crate::error::Error;

const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Typed lookups on behalf of one owner.
pub struct PropertyContext<'r> {
    resolver: &'r mut PropertyResolver,
    owner: Owner,
}

impl<'r> PropertyContext<'r> {
    pub fn new(resolver: &'r mut PropertyResolver, owner: Owner) -> Self {
        Self { resolver, owner }
    }

    /// A context owned by the type `T`, for name and location defaulting.
    pub fn of<T: ?Sized>(resolver: &'r mut PropertyResolver) -> Self {
        Self::new(resolver, Owner::of::<T>())
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn string(&mut self, property: &Property) -> Result<Option<String>, Error> {
        Ok(self.resolver.resolve(property, &self.owner)?)
    }

    /// Case-insensitive `"true"` is true, any other present value is false.
    pub fn boolean(&mut self, property: &Property) -> Result<Option<bool>, Error> {
        Ok(self
            .string(property)?
            .map(|value| value.eq_ignore_ascii_case("true")))
    }

    pub fn integer(&mut self, property: &Property) -> Result<Option<i32>, Error> {
        match self.string(property)? {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|source| Error::InvalidInteger { value, source }),
        }
    }

    pub fn long(&mut self, property: &Property) -> Result<Option<i64>, Error> {
        match self.string(property)? {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|source| Error::InvalidInteger { value, source }),
        }
    }

    pub fn float(&mut self, property: &Property) -> Result<Option<f32>, Error> {
        match self.string(property)? {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|source| Error::InvalidFloat { value, source }),
        }
    }

    pub fn double(&mut self, property: &Property) -> Result<Option<f64>, Error> {
        match self.string(property)? {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|source| Error::InvalidFloat { value, source }),
        }
    }

    /// Arbitrary-precision decimal. A request pattern containing `,` strips
    /// group separators from the value before parsing.
    pub fn big_decimal(&mut self, property: &Property) -> Result<Option<BigDecimal>, Error> {
        let Some(value) = self.string(property)? else {
            return Ok(None);
        };

        let stripped = if property.parse_pattern().is_some_and(|p| p.contains(',')) {
            value.replace(',', "")
        } else {
            value.clone()
        };

        stripped
            .parse()
            .map(Some)
            .map_err(|source| Error::InvalidDecimal { value, source })
    }

    /// Parses as a decimal, then truncates toward zero.
    pub fn big_integer(&mut self, property: &Property) -> Result<Option<BigInt>, Error> {
        Ok(self
            .big_decimal(property)?
            .and_then(|decimal| decimal.to_bigint()))
    }

    /// Parses with the request's chrono pattern, defaulting to
    /// `%Y-%m-%dT%H:%M:%S%.3f%z`. Patterns without an offset specifier are
    /// parsed naively and taken as UTC; date-only patterns parse to
    /// midnight.
    pub fn date(&mut self, property: &Property) -> Result<Option<DateTime<Utc>>, Error> {
        let Some(value) = self.string(property)? else {
            return Ok(None);
        };
        let pattern = property.parse_pattern().unwrap_or(DEFAULT_DATE_PATTERN);
        parse_date(&value, pattern)
            .map(Some)
            .map_err(|source| Error::InvalidDate { value, source })
    }

    pub fn json_array(&mut self, property: &Property) -> Result<Option<Vec<Value>>, Error> {
        match self.string(property)? {
            None => Ok(None),
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(|source| Error::InvalidJson { value, source }),
        }
    }

    pub fn json_object(
        &mut self,
        property: &Property,
    ) -> Result<Option<Map<String, Value>>, Error> {
        match self.string(property)? {
            None => Ok(None),
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(|source| Error::InvalidJson { value, source }),
        }
    }
}

fn parse_date(value: &str, pattern: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(zoned) = DateTime::parse_from_str(value, pattern) {
        return Ok(zoned.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, pattern).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
