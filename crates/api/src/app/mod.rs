//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: shared in-process services (item store, notification log)
//! - `routes/`: HTTP routes + handlers (one file per walkthrough area)
//! - `extract.rs`: typed request extractors and parameter parsing
//! - `dependencies.rs`: reusable dependencies resolved before handlers run
//! - `errors.rs`: consistent error responses
//! - `openapi.rs`: the generated API description

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dependencies;
pub mod errors;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(config: ApiConfig) -> Router {
    if !config.static_dir.is_dir() {
        tracing::warn!(dir = %config.static_dir.display(), "static directory does not exist");
    }

    let mut router = routes::router();
    if let Some(url) = &config.openapi_url {
        router = router.route(url, get(routes::docs::openapi_json));
        if let Some(url) = &config.docs_url {
            router = router.route(url, get(routes::docs::swagger_ui));
        }
        if let Some(url) = &config.redoc_url {
            router = router.route(url, get(routes::docs::redoc));
        }
    }

    let cors = middleware::cors_layer(&config.cors_origins);
    let static_files = ServeDir::new(&config.static_dir);
    let services = Arc::new(services::AppServices::new(config));

    router
        .nest_service("/static", static_files)
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::process_time))
                .layer(cors)
                .layer(axum::middleware::from_fn(middleware::background_tasks))
                .layer(Extension(services)),
        )
}
