use axum::{extract::Path, routing::get, Json, Router};

use firstshot_core::{TravelItem, lookup_travel_item};

use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new().route("/travel_items/:item_id", get(read_travel_item))
}

/// The response is whichever of the two item shapes the id refers to.
#[utoipa::path(
    get,
    path = "/travel_items/{item_id}",
    tag = "items",
    params(("item_id" = String, Path, description = "`item1` or `item2`")),
    responses(
        (status = 200, description = "A car or a plane", body = TravelItem),
        (status = 404, description = "Unknown item"),
    )
)]
pub async fn read_travel_item(Path(item_id): Path<String>) -> Result<Json<TravelItem>, ApiError> {
    lookup_travel_item(&item_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item not found"))
}
