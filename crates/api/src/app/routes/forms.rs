use axum::{
    extract::{Multipart, multipart::MultipartRejection},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Value, json};

use firstshot_core::{FieldError, ValidationErrors};

use crate::app::errors::ApiError;
use crate::app::extract::{FormFields, collect};

pub fn router() -> Router {
    #[allow(deprecated)]
    let files = post(create_file);

    Router::new()
        .route("/login/", post(login))
        .route("/files/", files)
        .route("/uploadfile/", post(create_upload_file))
        .route("/uploadfiles/", post(create_upload_files))
        .route("/uploads/", get(upload_page))
}

#[utoipa::path(
    post,
    path = "/login/",
    tag = "forms",
    request_body(content_type = "application/x-www-form-urlencoded", content = String, description = "`user-name` and `password` fields"),
    responses((status = 200, description = "The user name"))
)]
pub async fn login(FormFields(form): FormFields) -> Result<Json<Value>, ApiError> {
    let mut errors = ValidationErrors::new();
    let username = collect(&mut errors, form.require::<String>("user-name"));
    let password = collect(&mut errors, form.require::<String>("password"));

    match (username, password) {
        (Some(username), Some(_password)) => Ok(Json(json!({ "username": username }))),
        _ => Err(errors.into()),
    }
}

fn multipart(result: Result<Multipart, MultipartRejection>, field: &str) -> Result<Multipart, ApiError> {
    result.map_err(|e| {
        tracing::debug!(error = %e, "request is not multipart");
        FieldError::missing(field.to_string()).under("body").into()
    })
}

fn read_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::http(e.status(), e.body_text())
}

/// Small files: the whole `file` field is read into memory.
#[utoipa::path(
    post,
    path = "/files/",
    tag = "forms",
    request_body(content_type = "multipart/form-data", content = String, description = "A file read as bytes"),
    responses((status = 200, description = "The file size in bytes"))
)]
#[deprecated = "use /uploadfile/"]
pub async fn create_file(
    form: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut form = multipart(form, "file")?;
    while let Some(field) = form.next_field().await.map_err(read_error)? {
        if field.name() == Some("file") {
            let bytes = field.bytes().await.map_err(read_error)?;
            return Ok(Json(json!({ "file_size": bytes.len() })));
        }
    }
    Err(FieldError::missing("file").under("body").into())
}

/// Only the upload's metadata is used; the content is never buffered.
#[utoipa::path(
    post,
    path = "/uploadfile/",
    tag = "forms",
    request_body(content_type = "multipart/form-data", content = String, description = "A file read as an upload"),
    responses((status = 200, description = "The uploaded file name"))
)]
pub async fn create_upload_file(
    form: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut form = multipart(form, "file")?;
    while let Some(field) = form.next_field().await.map_err(read_error)? {
        if field.name() == Some("file") {
            return match field.file_name() {
                Some(name) => Ok(Json(json!({ "filename": name }))),
                None => Err(not_an_upload("file").into()),
            };
        }
    }
    Err(FieldError::missing("file").under("body").into())
}

#[utoipa::path(
    post,
    path = "/uploadfiles/",
    tag = "forms",
    request_body(content_type = "multipart/form-data", content = String, description = "Any number of `files` fields"),
    responses((status = 200, description = "The uploaded file names, in order"))
)]
pub async fn create_upload_files(
    form: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut form = multipart(form, "files")?;
    let mut filenames = Vec::new();
    while let Some(field) = form.next_field().await.map_err(read_error)? {
        if field.name() != Some("files") {
            continue;
        }
        match field.file_name() {
            Some(name) => filenames.push(name.to_string()),
            None => return Err(not_an_upload("files").into()),
        }
    }
    if filenames.is_empty() {
        return Err(FieldError::missing("files").under("body").into());
    }
    Ok(Json(json!({ "filenames": filenames })))
}

fn not_an_upload(field: &str) -> FieldError {
    FieldError::new("value_error", field.to_string(), "Value error, Expected UploadFile")
        .under("body")
}

pub async fn upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<form action="/files/" enctype="multipart/form-data" method="post">
<input name="file" type="file">
<input type="submit">
</form>
<form action="/uploadfiles/" enctype="multipart/form-data" method="post">
<input name="files" type="file" multiple>
<input type="submit">
</form>
</body>
</html>
"#;
