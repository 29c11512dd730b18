use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use firstshot_core::{ItemPatch, StoredItem};

use crate::app::dependencies::CommonQueryParams;
use crate::app::errors::ApiError;
use crate::app::extract::ValidJson;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/stored-items/", get(list_stored_items))
        .route(
            "/stored-items/:item_id",
            get(read_stored_item)
                .put(replace_stored_item)
                .patch(patch_stored_item),
        )
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredItemEntry {
    pub id: String,
    pub item: StoredItem,
}

#[utoipa::path(
    get,
    path = "/stored-items/",
    tag = "stored-items",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("skip" = Option<usize>, Query, description = "Defaults to 0"),
        ("limit" = Option<usize>, Query, description = "Defaults to 100"),
    ),
    responses((status = 200, description = "Items ordered by id", body = [StoredItemEntry]))
)]
pub async fn list_stored_items(
    Extension(services): Extension<Arc<AppServices>>,
    commons: CommonQueryParams,
) -> Json<Vec<StoredItemEntry>> {
    let items = services
        .items()
        .list(commons.q.as_deref(), commons.skip, commons.limit)
        .into_iter()
        .map(|(id, item)| StoredItemEntry { id, item })
        .collect();
    Json(items)
}

#[utoipa::path(
    get,
    path = "/stored-items/{item_id}",
    tag = "stored-items",
    params(("item_id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = StoredItem),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn read_stored_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
) -> Result<Json<StoredItem>, ApiError> {
    services
        .items()
        .get(&item_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item not found"))
}

/// Full replacement: omitted fields fall back to their defaults.
#[utoipa::path(
    put,
    path = "/stored-items/{item_id}",
    tag = "stored-items",
    params(("item_id" = String, Path, description = "Item id")),
    request_body = StoredItem,
    responses((status = 200, description = "The stored item", body = StoredItem))
)]
pub async fn replace_stored_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
    ValidJson(item): ValidJson<StoredItem>,
) -> Json<StoredItem> {
    Json(services.items().replace(&item_id, item))
}

/// Partial update: only the fields present in the body change.
#[utoipa::path(
    patch,
    path = "/stored-items/{item_id}",
    tag = "stored-items",
    params(("item_id" = String, Path, description = "Item id")),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "The updated item", body = StoredItem),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn patch_stored_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(item_id): Path<String>,
    ValidJson(patch): ValidJson<ItemPatch>,
) -> Result<Json<StoredItem>, ApiError> {
    services
        .items()
        .patch(&item_id, patch)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item not found"))
}
