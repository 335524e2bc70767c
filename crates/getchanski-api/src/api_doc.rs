//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use getchanski_core::models;
use getchanski_infra::ErrorResponse;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Getchanski API",
        version = "0.1.0",
        description = "Submits video URLs for audio extraction and signs users in through the Yandex OAuth implicit flow. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::urls::enqueue_url,
        handlers::oauth::authorize,
        handlers::oauth::callback_query,
        handlers::oauth::callback_json,
        handlers::health::health_check,
    ),
    components(schemas(
        models::EnqueueUrlRequest,
        models::EnqueueUrlResponse,
        models::OAuthCallbackRequest,
        models::OAuthCallbackResponse,
        models::RedirectResponse,
        ErrorResponse,
    )),
    tags(
        (name = "urls", description = "URL submission"),
        (name = "oauth", description = "OAuth redirect and callback"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;
