use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, header},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;
use uuid::Uuid;

use firstshot_core::{
    FieldError, Item, Rules, Schedule, ScheduleRequest, Validate, ValidationErrors,
    ValidationResult, featured_items,
};

use crate::app::errors::ApiError;
use crate::app::extract::{Cookies, Params, ValidJson, collect, merge, parse_json_body, parse_param};

/// Query key for the item search string.
pub const ITEM_QUERY: &str = "item-query";
/// Item ids live in `[0, MAX_ITEM_ID)`.
pub const MAX_ITEM_ID: i64 = 10_000_000;
pub const MAX_SIZE: f64 = 10.5;

pub fn router() -> Router {
    Router::new()
        .route("/items/", get(read_items))
        .route("/items/:item_id", get(read_item).put(update_item))
        .route("/items/:item_id/schedule", put(schedule_item))
}

/// Reads optional inputs from every request part: query, cookie and headers.
#[utoipa::path(
    get,
    path = "/items/",
    tag = "items",
    params(
        ("ads_id" = Option<String>, Cookie, description = "Ad tracking id"),
        ("user-agent" = Option<String>, Header, description = "Echoed back as `User-Agent`"),
        ("x-token" = Option<Vec<String>>, Header, description = "May be sent more than once"),
    ),
    responses((status = 200, description = "Items plus whatever was sent"))
)]
pub async fn read_items(
    params: Params,
    cookies: Cookies,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    // `item-query` is not listed in the OpenAPI document.
    let q: Option<String> = params.get(ITEM_QUERY)?;
    if let Some(q) = &q {
        Rules::new()
            .check(
                q.starts_with("q:"),
                ITEM_QUERY,
                "string_pattern_mismatch",
                "String should match pattern '^q:.*$'",
                q,
            )
            .finish()
            .map_err(|e| e.under("query"))?;
    }

    let mut results = Map::new();
    results.insert(
        "items".into(),
        json!([{ "item_id": "Foo" }, { "item_id": "Bar" }]),
    );
    if let Some(q) = q.filter(|q| !q.is_empty()) {
        results.insert("q".into(), json!(q));
    }
    if let Some(ads_id) = cookies.get("ads_id").filter(|v| !v.is_empty()) {
        results.insert("ads_id".into(), json!(ads_id));
    }
    if let Some(ua) = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        results.insert("User-Agent".into(), json!(ua));
    }
    let tokens: Vec<&str> = headers
        .get_all("x-token")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if !tokens.is_empty() {
        results.insert("X-Token values".into(), json!(tokens));
    }

    Ok(Json(Value::Object(results)))
}

/// Path, repeated query, bounded float query and a bare integer body, all
/// checked together.
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(
        ("item_id" = i64, Path, description = "The ID of the item to get, in [0, 10000000)"),
        ("q" = Vec<String>, Query, description = "3 to 20 characters each"),
        ("size" = f64, Query, description = "Strictly between 0 and 10.5"),
    ),
    request_body(content = i64, description = "importance (>= 0)"),
    responses(
        (status = 200, description = "Featured items", body = [Item]),
        (status = 422, description = "Validation error"),
    )
)]
pub async fn read_item(
    Path(raw_id): Path<String>,
    params: Params,
    body: Bytes,
) -> Result<Json<Vec<Item>>, ApiError> {
    let mut errors = ValidationErrors::new();

    let item_id = collect(&mut errors, parse_param::<i64>("path", "item_id", &raw_id));
    if let Some(id) = item_id {
        let mut rules = Rules::new();
        rules.ge("item_id", id, 0).lt("item_id", id, MAX_ITEM_ID);
        merge(&mut errors, "path", rules.finish());
    }

    let q = params.all("q");
    if q.is_empty() {
        errors.push(FieldError::missing("q").under("query"));
    } else {
        let mut rules = Rules::new();
        for (i, value) in q.iter().enumerate() {
            rules.min_length(i, value, 3).max_length(i, value, 20);
        }
        if let Err(e) = rules.finish() {
            errors.extend(e.under("q").under("query"));
        }
    }

    let size = collect(&mut errors, params.require::<f64>("size"));
    if let Some(size) = size {
        let mut rules = Rules::new();
        rules.gt("size", size, 0.0).lt("size", size, MAX_SIZE);
        merge(&mut errors, "query", rules.finish());
    }

    let importance = collect(&mut errors, parse_json_body::<i64>(&body));
    if let Some(importance) = importance {
        if let Err(e) = Rules::new().ge("body", importance, 0).finish() {
            errors.extend(e);
        }
    }

    match (item_id, size, importance) {
        (Some(item_id), Some(size), Some(importance)) if errors.is_empty() => {
            tracing::info!(item_id, ?q, size, importance, "item lookup");
            Ok(Json(featured_items()))
        }
        _ => Err(errors.into()),
    }
}

/// `{"item": ...}`: a single body parameter embedded under its name.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmbeddedItem {
    pub item: Item,
}

impl Validate for EmbeddedItem {
    fn validate(&self) -> ValidationResult<()> {
        Rules::new().nested("item", &self.item).finish()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemUpdate {
    pub item_id: i64,
    pub item: Item,
}

#[utoipa::path(
    put,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    request_body = EmbeddedItem,
    responses((status = 200, description = "The id and the item", body = ItemUpdate))
)]
pub async fn update_item(
    Path(raw_id): Path<String>,
    ValidJson(body): ValidJson<EmbeddedItem>,
) -> Result<Json<ItemUpdate>, ApiError> {
    let item_id = parse_param::<i64>("path", "item_id", &raw_id)?;
    Ok(Json(ItemUpdate {
        item_id,
        item: body.item,
    }))
}

/// UUID path, datetimes, a duration in seconds and a time of day.
#[utoipa::path(
    put,
    path = "/items/{item_id}/schedule",
    tag = "items",
    params(("item_id" = Uuid, Path, description = "Item UUID")),
    request_body = ScheduleRequest,
    responses((status = 200, description = "The computed schedule", body = Schedule))
)]
pub async fn schedule_item(
    Path(raw_id): Path<String>,
    ValidJson(request): ValidJson<ScheduleRequest>,
) -> Result<Json<Schedule>, ApiError> {
    let item_id = parse_param::<Uuid>("path", "item_id", &raw_id)?;
    let schedule = request.plan(item_id).map_err(|e| e.under("body"))?;
    Ok(Json(schedule))
}
