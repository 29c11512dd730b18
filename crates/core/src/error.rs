//! Validation error model.
//!
//! Errors carry a location path (`["body", "item", "images", 0, "url"]`) so the
//! HTTP layer can report exactly which input failed and why.

use serde::Serialize;
use thiserror::Error;

/// Result type used by field-rule checks.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// One segment of an error location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Loc {
    Key(String),
    Index(usize),
}

impl From<&str> for Loc {
    fn from(value: &str) -> Self {
        Self::Key(value.to_string())
    }
}

impl From<String> for Loc {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

impl From<usize> for Loc {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl core::fmt::Display for Loc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Loc::Key(k) => f.write_str(k),
            Loc::Index(i) => write!(f, "{i}"),
        }
    }
}

fn loc_path(loc: &[Loc]) -> String {
    loc.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{}: {msg}", loc_path(.loc))]
pub struct FieldError {
    /// Machine-readable error kind (e.g. `greater_than`, `missing`).
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<Loc>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
}

impl FieldError {
    pub fn new(kind: &'static str, loc: impl Into<Loc>, msg: impl Into<String>) -> Self {
        Self {
            kind,
            loc: vec![loc.into()],
            msg: msg.into(),
            input: None,
        }
    }

    /// A required value was not supplied.
    pub fn missing(loc: impl Into<Loc>) -> Self {
        Self::new("missing", loc, "Field required")
    }

    pub fn with_input(mut self, input: impl Serialize) -> Self {
        self.input = serde_json::to_value(input).ok();
        self
    }

    /// Prepend a segment to the location path.
    pub fn under(mut self, prefix: impl Into<Loc>) -> Self {
        self.loc.insert(0, prefix.into());
        self
    }
}

/// A non-empty-on-failure collection of [`FieldError`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Error)]
#[serde(transparent)]
#[error("{} validation error(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Prepend `prefix` to every error's location.
    pub fn under(self, prefix: impl Into<Loc>) -> Self {
        let prefix = prefix.into();
        Self(self.0.into_iter().map(|e| e.under(prefix.clone())).collect())
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(value: FieldError) -> Self {
        Self(vec![value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_prefixes_every_location() {
        let mut errs = ValidationErrors::new();
        errs.push(FieldError::missing("name"));
        errs.push(FieldError::new("greater_than", "price", "Input should be greater than 0"));

        let errs = errs.under(0usize).under("body");
        let locs: Vec<String> = errs.errors().iter().map(|e| loc_path(&e.loc)).collect();
        assert_eq!(locs, vec!["body.0.name", "body.0.price"]);
    }

    #[test]
    fn serializes_in_detail_shape() {
        let err = FieldError::missing("q").under("query").with_input(serde_json::Value::Null);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "missing");
        assert_eq!(json["loc"], serde_json::json!(["query", "q"]));
        assert_eq!(json["msg"], "Field required");
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert_eq!(
            ValidationErrors::from(FieldError::missing("x")).to_string(),
            "1 validation error(s)"
        );
    }
}
