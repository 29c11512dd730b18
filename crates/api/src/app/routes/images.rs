use std::collections::BTreeMap;

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use firstshot_core::{Image, Validate, ValidationResult};

use crate::app::extract::ValidJson;

pub fn router() -> Router {
    Router::new()
        .route("/images/multiple/", post(create_multiple_images))
        .route("/index-weights/", post(create_index_weights))
}

#[utoipa::path(
    post,
    path = "/images/multiple/",
    tag = "images",
    request_body = [Image],
    responses((status = 200, description = "The images", body = [Image]))
)]
pub async fn create_multiple_images(ValidJson(images): ValidJson<Vec<Image>>) -> Json<Vec<Image>> {
    Json(images)
}

/// Integer keys (sent as JSON strings) mapped to float weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexWeights(pub BTreeMap<i64, f64>);

/// Key and value conversion happen during decoding; no further rules.
impl Validate for IndexWeights {
    fn validate(&self) -> ValidationResult<()> {
        Ok(())
    }
}

#[utoipa::path(
    post,
    path = "/index-weights/",
    tag = "images",
    responses((status = 200, description = "The weights, keyed by integer index"))
)]
pub async fn create_index_weights(ValidJson(weights): ValidJson<IndexWeights>) -> Json<IndexWeights> {
    Json(weights)
}
