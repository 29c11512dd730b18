use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use firstshot_core::{FieldError, ValidationErrors};

/// Every way a handler can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request data did not satisfy the endpoint's parameter/body rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// An explicit HTTP error with a `detail` payload and optional headers.
    #[error("{status}: {detail}")]
    Http {
        status: StatusCode,
        detail: String,
        headers: Vec<(&'static str, String)>,
    },

    /// A unicorn misbehaved; mapped to 418 by its own handler.
    #[error("unicorn {name} did something")]
    Unicorn { name: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn http(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: detail.into(),
            headers: Vec::new(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::http(StatusCode::NOT_FOUND, detail)
    }

    /// Attach a response header (only meaningful for [`ApiError::Http`]).
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Http { headers, .. } = &mut self {
            headers.push((name, value.into()));
        }
        self
    }
}

impl From<FieldError> for ApiError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::warn!(detail = ?errors.errors(), "request validation failed");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    axum::Json(json!({ "detail": errors })),
                )
                    .into_response()
            }
            ApiError::Http {
                status,
                detail,
                headers,
            } => {
                let mut response = json_detail(status, detail);
                for (name, value) in headers {
                    match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                        (Ok(n), Ok(v)) => {
                            response.headers_mut().insert(n, v);
                        }
                        _ => tracing::warn!(header = name, "dropping invalid error header"),
                    }
                }
                response
            }
            ApiError::Unicorn { name } => unicorn_response(&name),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "unhandled error");
                json_detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

pub fn json_detail(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "detail": detail.into() }))).into_response()
}

fn unicorn_response(name: &str) -> Response {
    (
        StatusCode::IM_A_TEAPOT,
        axum::Json(json!({
            "message": format!("Oops! {name} did something. There goes a rainbow..."),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_headers() {
        let resp = ApiError::not_found("Offer not found")
            .with_header("x-error", "There goes my error")
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["x-error"], "There goes my error");
    }

    #[test]
    fn validation_maps_to_422() {
        let resp = ApiError::from(FieldError::missing("q").under("query")).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unicorn_is_a_teapot() {
        let resp = ApiError::Unicorn { name: "yolo".into() }.into_response();
        assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    }
}
