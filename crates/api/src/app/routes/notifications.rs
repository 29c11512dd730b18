use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::post,
    Json, Router,
};
use serde_json::{Value, json};

use crate::app::dependencies::LoggedQuery;
use crate::app::services::AppServices;
use crate::context::BackgroundTasks;

pub fn router() -> Router {
    Router::new().route("/send-notification/:email", post(send_notification))
}

/// Answers immediately; the log lines are written once the response is out.
///
/// Tasks queued by the `q` dependency run before the handler's own task.
#[utoipa::path(
    post,
    path = "/send-notification/{email}",
    tag = "notifications",
    params(
        ("email" = String, Path, description = "Recipient"),
        ("q" = Option<String>, Query, description = "Logged as `found query: {q}`"),
    ),
    responses((status = 200, description = "Message queued"))
)]
pub async fn send_notification(
    Extension(services): Extension<Arc<AppServices>>,
    Path(email): Path<String>,
    LoggedQuery(q): LoggedQuery,
    tasks: BackgroundTasks,
) -> Json<Value> {
    tracing::info!(%email, has_query = q.is_some(), "notification queued");

    let log = services.notifications().clone();
    tasks.add_task(log.write_log(format!("message to {email}\n")));

    Json(json!({ "message": "Message sent" }))
}
