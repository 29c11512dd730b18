use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};

use crate::app::errors::{self, ApiError};
use crate::app::extract::Params;

pub const PORTAL_URL: &str = "https://example.com/";

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Greeting"))
)]
pub async fn read_main() -> Json<Value> {
    Json(json!({ "msg": "Hello World" }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> Response {
    errors::json_detail(StatusCode::NOT_FOUND, "Not Found")
}

/// Either a JSON message or a redirect, depending on `teleport`.
#[utoipa::path(
    get,
    path = "/portal",
    tag = "system",
    params(("teleport" = Option<bool>, Query, description = "Redirect instead of answering")),
    responses(
        (status = 200, description = "The portal"),
        (status = 307, description = "Teleported"),
    )
)]
pub async fn get_portal(params: Params) -> Result<Response, ApiError> {
    let teleport = params.get::<bool>("teleport")?.unwrap_or(false);
    if teleport {
        return Ok(Redirect::temporary(PORTAL_URL).into_response());
    }
    Ok(Json(json!({ "message": "Here's your interdimensional portal." })).into_response())
}
