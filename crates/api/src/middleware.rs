use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::context::BackgroundTasks;

pub const PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

/// Adds `X-Process-Time` (seconds spent producing the response).
pub async fn process_time(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = started.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&elapsed.to_string()) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    response
}

/// Gives every request a [`BackgroundTasks`] queue and runs whatever was
/// queued once the inner service has returned its response.
pub async fn background_tasks(mut req: Request, next: Next) -> Response {
    let tasks = BackgroundTasks::new();
    req.extensions_mut().insert(tasks.clone());

    let response = next.run(req).await;

    let pending = tasks.take();
    if !pending.is_empty() {
        tracing::debug!(count = pending.len(), "running background tasks");
        tokio::spawn(async move {
            for task in pending {
                task.await;
            }
        });
    }
    response
}

/// Credentialed CORS for an explicit origin list.
///
/// Methods and headers are mirrored from the preflight request since
/// wildcards are not allowed together with credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
