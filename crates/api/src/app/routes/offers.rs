use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};

use firstshot_core::{Offer, lookup_offer};

use crate::app::errors::ApiError;
use crate::app::extract::ValidJson;

pub fn router() -> Router {
    Router::new()
        .route("/offers/", post(create_offer))
        .route("/offers/:offer_id", get(read_offer))
}

#[utoipa::path(
    get,
    path = "/offers/{offer_id}",
    tag = "offers",
    params(("offer_id" = String, Path, description = "Offer id")),
    responses(
        (status = 200, description = "The offer", body = Offer),
        (status = 404, description = "Offer not found; carries an `X-Error` header"),
    )
)]
pub async fn read_offer(Path(offer_id): Path<String>) -> Result<Json<Offer>, ApiError> {
    lookup_offer(&offer_id).map(Json).ok_or_else(|| {
        ApiError::not_found("Offer not found").with_header("x-error", "There goes my error")
    })
}

#[utoipa::path(
    post,
    path = "/offers/",
    tag = "offers",
    request_body = Offer,
    responses((status = 200, description = "The offer, with every nested item validated", body = Offer))
)]
pub async fn create_offer(ValidJson(offer): ValidJson<Offer>) -> Json<Offer> {
    Json(offer)
}
