//! Extractors that turn raw request parts into typed, validated values.
//!
//! Failures are reported as [`ApiError::Validation`] with the location of the
//! offending input (`path`, `query`, `cookie`, `header`, `body`).

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, header, request::Parts},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use firstshot_core::{FieldError, Loc, Validate, ValidationErrors, ValidationResult};

use crate::app::errors::ApiError;

/// A scalar that can be read from a path segment, query string or form field.
pub trait FromParam: Sized {
    const KIND: &'static str;
    const MSG: &'static str;

    fn from_param(raw: &str) -> Option<Self>;
}

impl FromParam for String {
    const KIND: &'static str = "string_type";
    const MSG: &'static str = "Input should be a valid string";

    fn from_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromParam for i64 {
    const KIND: &'static str = "int_parsing";
    const MSG: &'static str = "Input should be a valid integer, unable to parse string as an integer";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromParam for usize {
    const KIND: &'static str = "int_parsing";
    const MSG: &'static str =
        "Input should be a valid non-negative integer, unable to parse string as an integer";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromParam for f64 {
    const KIND: &'static str = "float_parsing";
    const MSG: &'static str = "Input should be a valid number, unable to parse string as a number";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl FromParam for bool {
    const KIND: &'static str = "bool_parsing";
    const MSG: &'static str = "Input should be a valid boolean, unable to interpret input";

    fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
            _ => None,
        }
    }
}

impl FromParam for Uuid {
    const KIND: &'static str = "uuid_parsing";
    const MSG: &'static str = "Input should be a valid UUID";

    fn from_param(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok()
    }
}

/// Parse `raw` as `T`, reporting failures at `[source, name]`.
pub fn parse_param<T: FromParam>(source: &'static str, name: &str, raw: &str) -> Result<T, FieldError> {
    T::from_param(raw).ok_or_else(|| {
        FieldError::new(T::KIND, name, T::MSG)
            .under(source)
            .with_input(raw)
    })
}

/// Keep the value, or stash the error and carry on so every problem is
/// reported at once.
pub fn collect<T, E>(errors: &mut ValidationErrors, result: Result<T, E>) -> Option<T>
where
    E: Into<ValidationErrors>,
{
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.extend(e.into());
            None
        }
    }
}

/// Fold a rule result into `errors` under `prefix`.
pub fn merge(errors: &mut ValidationErrors, prefix: &'static str, result: ValidationResult<()>) {
    if let Err(e) = result {
        errors.extend(e.under(prefix));
    }
}

/// Urlencoded key/value pairs from the query string or a form body.
///
/// Repeated keys are kept in order.
#[derive(Debug, Clone, Default)]
pub struct Params {
    source: &'static str,
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn parse(source: &'static str, raw: &[u8]) -> Self {
        Self {
            source,
            pairs: url::form_urlencoded::parse(raw).into_owned().collect(),
        }
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn get<T: FromParam>(&self, name: &str) -> Result<Option<T>, FieldError> {
        self.first(name)
            .map(|raw| parse_param(self.source, name, raw))
            .transpose()
    }

    pub fn require<T: FromParam>(&self, name: &str) -> Result<T, FieldError> {
        self.get(name)?
            .ok_or_else(|| FieldError::missing(name).under(self.source))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Params
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse("query", parts.uri.query().unwrap_or_default().as_bytes()))
    }
}

/// An `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone)]
pub struct FormFields(pub Params);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = read_body(req, state).await?;
        Ok(Self(Params::parse("body", &bytes)))
    }
}

/// Cookies sent with the request.
#[derive(Debug, Clone, Default)]
pub struct Cookies(Vec<(String, String)>);

impl Cookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let pairs = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=')?;
                Some((k.trim().to_string(), v.trim().trim_matches('"').to_string()))
            })
            .collect();
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Cookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Decode a JSON body. An empty body counts as missing.
///
/// Decoding errors are located at the JSON path where they happened.
pub fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FieldError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(FieldError::missing("body"));
    }
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|e| json_error(&e))?;
    de.end().map_err(|e| json_invalid(&e))?;
    Ok(value)
}

fn json_error(e: &serde_path_to_error::Error<serde_json::Error>) -> FieldError {
    use serde_json::error::Category;

    let inner = e.inner();
    if !matches!(inner.classify(), Category::Data) {
        return json_invalid(inner);
    }

    let mut loc = vec![Loc::from("body")];
    loc.extend(path_locs(e.path()));
    let msg = inner.to_string();
    match missing_field(&msg) {
        Some(field) => {
            loc.push(Loc::from(field));
            FieldError {
                loc,
                ..FieldError::missing("body")
            }
        }
        None => FieldError {
            loc,
            ..FieldError::new("value_error", "body", msg)
        },
    }
}

fn json_invalid(e: &serde_json::Error) -> FieldError {
    FieldError::new("json_invalid", "body", format!("JSON decode error: {e}"))
}

fn path_locs(path: &serde_path_to_error::Path) -> Vec<Loc> {
    use serde_path_to_error::Segment;

    path.iter()
        .filter_map(|segment| match segment {
            Segment::Seq { index } => Some(Loc::Index(*index)),
            Segment::Map { key } => Some(Loc::Key(key.clone())),
            Segment::Enum { variant } => Some(Loc::Key(variant.clone())),
            _ => None,
        })
        .collect()
}

fn missing_field(msg: &str) -> Option<&str> {
    msg.strip_prefix("missing field `")?.split('`').next()
}

async fn read_body<S: Send + Sync>(req: Request, state: &S) -> Result<Bytes, ApiError> {
    Bytes::from_request(req, state)
        .await
        .map_err(|e| ApiError::http(e.status(), e.body_text()))
}

/// JSON body that has passed its type's [`Validate`] rules.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = read_body(req, state).await?;
        let value: T = parse_json_body(&bytes)?;
        value.validate().map_err(|e| e.under("body"))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_are_kept_in_order() {
        let params = Params::parse("query", b"q=foo&size=1.5&q=bar%20baz");
        assert_eq!(params.all("q"), vec!["foo", "bar baz"]);
        assert_eq!(params.get::<f64>("size").unwrap(), Some(1.5));
        assert_eq!(params.get::<f64>("missing").unwrap(), None);
    }

    #[test]
    fn bad_scalars_and_missing_params_are_located() {
        let params = Params::parse("query", b"size=big");
        let err = params.get::<f64>("size").unwrap_err();
        assert_eq!(err.kind, "float_parsing");
        assert_eq!(err.to_string(), "query.size: Input should be a valid number, unable to parse string as a number");

        let err = params.require::<i64>("skip").unwrap_err();
        assert_eq!(err.kind, "missing");
    }

    #[test]
    fn bools_accept_common_spellings() {
        for raw in ["true", "1", "Yes", "on"] {
            assert_eq!(bool::from_param(raw), Some(true));
        }
        for raw in ["false", "0", "no", "OFF"] {
            assert_eq!(bool::from_param(raw), Some(false));
        }
        assert_eq!(bool::from_param("maybe"), None);
    }

    #[test]
    fn cookies_are_split_and_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "ads_id=abc; theme=dark".parse().unwrap());
        let cookies = Cookies::from_headers(&headers);
        assert_eq!(cookies.get("ads_id"), Some("abc"));
        assert_eq!(cookies.get("theme"), Some("dark"));
        assert_eq!(cookies.get("nope"), None);
    }

    #[test]
    fn json_body_errors() {
        let err = parse_json_body::<i64>(b"  ").unwrap_err();
        assert_eq!(err.kind, "missing");

        let err = parse_json_body::<firstshot_core::Image>(br#"{"url": "https://x.io"}"#).unwrap_err();
        assert_eq!(err.kind, "missing");
        assert_eq!(err.to_string(), "body.name: Field required");

        let err = parse_json_body::<i64>(b"{oops").unwrap_err();
        assert_eq!(err.kind, "json_invalid");

        let err = parse_json_body::<i64>(b"1 2").unwrap_err();
        assert_eq!(err.kind, "json_invalid");
    }

    #[test]
    fn nested_json_errors_keep_their_path() {
        let err = parse_json_body::<firstshot_core::Offer>(
            br#"{"name": "Bundle", "price": 1.0, "items": [{"price": 2.0}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, "missing");
        assert_eq!(err.to_string(), "body.items.0.name: Field required");

        let err = parse_json_body::<firstshot_core::Offer>(
            br#"{"name": "Bundle", "price": 1.0, "items": [{"name": "a", "price": "cheap"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, "value_error");
        assert_eq!(
            serde_json::to_value(&err.loc).unwrap(),
            serde_json::json!(["body", "items", 0, "price"])
        );
    }
}
