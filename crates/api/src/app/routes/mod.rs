use axum::{routing::get, Router};

pub mod docs;
pub mod forms;
pub mod images;
pub mod items;
pub mod notifications;
pub mod offers;
pub mod stored_items;
pub mod system;
pub mod travel;
pub mod unicorns;
pub mod users;

/// Router for every walkthrough endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::read_main))
        .route("/health", get(system::health))
        .route("/portal", get(system::get_portal))
        .merge(items::router())
        .merge(travel::router())
        .merge(users::router())
        .merge(offers::router())
        .merge(images::router())
        .merge(forms::router())
        .merge(unicorns::router())
        .merge(notifications::router())
        .merge(stored_items::router())
}
