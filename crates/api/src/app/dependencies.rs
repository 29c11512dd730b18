//! Reusable request dependencies.
//!
//! Each one is an extractor: a handler lists it as an argument and axum
//! resolves it (and whatever it depends on) before the handler body runs.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use firstshot_core::ValidationErrors;

use crate::app::errors::ApiError;
use crate::app::extract::{Params, collect};
use crate::app::services::AppServices;
use crate::context::BackgroundTasks;

pub const DEFAULT_LIMIT: usize = 100;

/// `q`, `skip`, `limit` shared by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonQueryParams {
    pub q: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

impl CommonQueryParams {
    pub fn from_params(params: &Params) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let q = collect(&mut errors, params.get::<String>("q"));
        let skip = collect(&mut errors, params.get::<usize>("skip"));
        let limit = collect(&mut errors, params.get::<usize>("limit"));
        errors.into_result()?;

        Ok(Self {
            q: q.flatten(),
            skip: skip.flatten().unwrap_or(0),
            limit: limit.flatten().unwrap_or(DEFAULT_LIMIT),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CommonQueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(params) = Params::from_request_parts(parts, state).await;
        Ok(Self::from_params(&params)?)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BackgroundTasks
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BackgroundTasks>()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("background task middleware is not installed").into())
    }
}

fn services(parts: &Parts) -> Result<Arc<AppServices>, ApiError> {
    parts
        .extensions
        .get::<Arc<AppServices>>()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("AppServices extension is not installed").into())
}

/// Optional `q` query parameter; when present, a `found query` line is queued
/// for the notification log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedQuery(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for LoggedQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(params) = Params::from_request_parts(parts, state).await;
        let q = params.get::<String>("q")?.filter(|q| !q.is_empty());

        if let Some(q) = &q {
            let tasks = BackgroundTasks::from_request_parts(parts, state).await?;
            let log = services(parts)?.notifications().clone();
            tasks.add_task(log.write_log(format!("found query: {q}\n")));
        }
        Ok(Self(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_params_default_and_parse() {
        let params = Params::parse("query", b"");
        assert_eq!(
            CommonQueryParams::from_params(&params).unwrap(),
            CommonQueryParams { q: None, skip: 0, limit: DEFAULT_LIMIT }
        );

        let params = Params::parse("query", b"q=foo&skip=2&limit=5");
        assert_eq!(
            CommonQueryParams::from_params(&params).unwrap(),
            CommonQueryParams { q: Some("foo".into()), skip: 2, limit: 5 }
        );
    }

    #[test]
    fn common_params_report_every_bad_value() {
        let params = Params::parse("query", b"skip=-1&limit=lots");
        let err = CommonQueryParams::from_params(&params).unwrap_err();
        assert_eq!(err.len(), 2);
    }
}
