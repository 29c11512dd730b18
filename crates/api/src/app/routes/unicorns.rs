use axum::{extract::Path, routing::get, Json, Router};
use serde_json::{Value, json};

use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/unicorns/:name", get(read_unicorn))
}

#[utoipa::path(
    get,
    path = "/unicorns/{name}",
    tag = "errors",
    params(("name" = String, Path, description = "`yolo` misbehaves")),
    responses(
        (status = 200, description = "The unicorn"),
        (status = 418, description = "The unicorn did something"),
    )
)]
pub async fn read_unicorn(Path(name): Path<String>) -> Result<Json<Value>, ApiError> {
    if name == "yolo" {
        return Err(ApiError::Unicorn { name });
    }
    Ok(Json(json!({ "unicorn_name": name })))
}
