//! Declarative field rules.
//!
//! Payload types implement [`Validate`] by running a [`Rules`] collector over
//! their fields. Every failing rule is reported, not just the first one.

use core::fmt::Display;

use serde::Serialize;

use crate::error::{FieldError, Loc, ValidationErrors, ValidationResult};

/// Longest URL accepted by [`Rules::http_url`].
pub const MAX_URL_LENGTH: usize = 2083;

/// Field-level checks on a deserialized payload.
pub trait Validate {
    /// Error locations are relative to `self`.
    fn validate(&self) -> ValidationResult<()>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        for (i, v) in self.iter().enumerate() {
            if let Err(e) = v.validate() {
                errors.extend(e.under(i));
            }
        }
        errors.into_result()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> ValidationResult<()> {
        match self {
            Some(v) => v.validate(),
            None => Ok(()),
        }
    }
}

/// Error collector for one value's fields.
#[derive(Debug, Default)]
pub struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure when `ok` is false.
    pub fn check(
        &mut self,
        ok: bool,
        loc: impl Into<Loc>,
        kind: &'static str,
        msg: impl Into<String>,
        input: impl Serialize,
    ) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(kind, loc, msg).with_input(input));
        }
        self
    }

    pub fn gt<T>(&mut self, loc: impl Into<Loc>, value: T, bound: T) -> &mut Self
    where
        T: PartialOrd + Display + Serialize,
    {
        let msg = format!("Input should be greater than {bound}");
        self.check(value > bound, loc, "greater_than", msg, value)
    }

    pub fn ge<T>(&mut self, loc: impl Into<Loc>, value: T, bound: T) -> &mut Self
    where
        T: PartialOrd + Display + Serialize,
    {
        let msg = format!("Input should be greater than or equal to {bound}");
        self.check(value >= bound, loc, "greater_than_equal", msg, value)
    }

    pub fn lt<T>(&mut self, loc: impl Into<Loc>, value: T, bound: T) -> &mut Self
    where
        T: PartialOrd + Display + Serialize,
    {
        let msg = format!("Input should be less than {bound}");
        self.check(value < bound, loc, "less_than", msg, value)
    }

    pub fn min_length(&mut self, loc: impl Into<Loc>, value: &str, min: usize) -> &mut Self {
        let msg = format!("String should have at least {min} characters");
        self.check(value.chars().count() >= min, loc, "string_too_short", msg, value)
    }

    pub fn max_length(&mut self, loc: impl Into<Loc>, value: &str, max: usize) -> &mut Self {
        let msg = format!("String should have at most {max} characters");
        self.check(value.chars().count() <= max, loc, "string_too_long", msg, value)
    }

    /// Absolute `http`/`https` URL with a host.
    pub fn http_url(&mut self, loc: impl Into<Loc>, value: &str) -> &mut Self {
        let loc = loc.into();
        if value.chars().count() > MAX_URL_LENGTH {
            return self.max_length(loc, value, MAX_URL_LENGTH);
        }
        match url::Url::parse(value) {
            Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => self,
            Ok(_) => self.check(
                false,
                loc,
                "url_scheme",
                "URL scheme should be 'http' or 'https'",
                value,
            ),
            Err(e) => self.check(
                false,
                loc,
                "url_parsing",
                format!("Input should be a valid URL, {e}"),
                value,
            ),
        }
    }

    /// Run a nested value's own rules under `loc`.
    pub fn nested<T: Validate>(&mut self, loc: impl Into<Loc>, value: &T) -> &mut Self {
        if let Err(e) = value.validate() {
            self.errors.extend(e.under(loc));
        }
        self
    }

    pub fn finish(&mut self) -> ValidationResult<()> {
        core::mem::take(&mut self.errors).into_result()
    }
}
