//! Generated API description and the pages that render it.

use std::sync::Arc;

use axum::{extract::Extension, response::Html, Json};
use utoipa::OpenApi;

use crate::app::openapi::ApiDoc;
use crate::app::services::AppServices;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn swagger_ui(Extension(services): Extension<Arc<AppServices>>) -> Html<String> {
    Html(swagger_page(openapi_url(&services)))
}

pub async fn redoc(Extension(services): Extension<Arc<AppServices>>) -> Html<String> {
    Html(redoc_page(openapi_url(&services)))
}

fn openapi_url(services: &AppServices) -> &str {
    services.config().openapi_url.as_deref().unwrap_or("/openapi.json")
}

pub fn swagger_page(openapi_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
<title>{title} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{openapi_url}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    showExtensions: true,
    showCommonExtensions: true,
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
}})
</script>
</body>
</html>
"#,
        title = ApiDoc::TITLE,
    )
}

pub fn redoc_page(openapi_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
<redoc spec-url="{openapi_url}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@next/bundles/redoc.standalone.js"></script>
</body>
</html>
"#,
        title = ApiDoc::TITLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_point_at_the_document() {
        assert!(swagger_page("/spec.json").contains("url: '/spec.json'"));
        assert!(redoc_page("/spec.json").contains(r#"spec-url="/spec.json""#));
    }
}
