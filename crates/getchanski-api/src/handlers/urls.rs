use axum::{extract::State, response::Json};
use std::sync::Arc;

use getchanski_core::constants::STATUS_OK;
use getchanski_core::models::{EnqueueUrlRequest, EnqueueUrlResponse};
use getchanski_infra::ErrorResponse;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Submit a URL for audio extraction
#[utoipa::path(
    post,
    path = "/api/v0/urls",
    tag = "urls",
    request_body = EnqueueUrlRequest,
    responses(
        (status = 200, description = "URL enqueued", body = EnqueueUrlResponse),
        (status = 400, description = "Missing or malformed URL", body = ErrorResponse),
        (status = 502, description = "Queue unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(url = %request.url))]
pub async fn enqueue_url(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<EnqueueUrlRequest>,
) -> Result<Json<EnqueueUrlResponse>, HttpAppError> {
    let message_id = state.urls.enqueue_url(&request.url).await?;

    Ok(Json(EnqueueUrlResponse {
        status: STATUS_OK.to_string(),
        message_id: Some(message_id),
    }))
}
