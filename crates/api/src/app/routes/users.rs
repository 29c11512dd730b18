use axum::{routing::post, Json, Router};

use firstshot_core::{BaseUser, UserIn};

use crate::app::extract::ValidJson;

pub fn router() -> Router {
    Router::new().route("/user/", post(create_user))
}

/// The response model has no password field, so the password is never echoed.
#[utoipa::path(
    post,
    path = "/user/",
    tag = "users",
    request_body = UserIn,
    responses((status = 200, description = "The created user", body = BaseUser))
)]
pub async fn create_user(ValidJson(user): ValidJson<UserIn>) -> Json<BaseUser> {
    tracing::info!(username = %user.username, "user created");
    Json(user.into())
}
