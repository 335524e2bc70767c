use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use getchanski_core::models::{OAuthCallbackRequest, OAuthCallbackResponse, RedirectResponse};
use getchanski_infra::ErrorResponse;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Authorization URL the browser should be sent to
#[utoipa::path(
    get,
    path = "/api/v0/oauth/authorize",
    tag = "oauth",
    responses(
        (status = 200, description = "Provider authorization URL", body = RedirectResponse)
    )
)]
pub async fn authorize(State(state): State<Arc<AppState>>) -> Json<RedirectResponse> {
    Json(RedirectResponse {
        redirect_url: state.oauth_config.authorization_url(),
    })
}

/// OAuth callback with the token fields in the query string
#[utoipa::path(
    get,
    path = "/api/v0/oauth/callback",
    tag = "oauth",
    params(
        ("access_token" = Option<String>, Query, description = "Access token issued by the provider"),
        ("expires_in" = Option<i64>, Query, description = "Token lifetime in seconds"),
        ("token_type" = Option<String>, Query, description = "Token type"),
        ("error" = Option<String>, Query, description = "Set when the user declined"),
        ("error_description" = Option<String>, Query, description = "Provider error description")
    ),
    responses(
        (status = 200, description = "User stored, or authorization declined (status ErrOK)", body = OAuthCallbackResponse),
        (status = 502, description = "Profile API failure", body = ErrorResponse),
        (status = 500, description = "User table failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn callback_query(
    State(state): State<Arc<AppState>>,
    Query(request): Query<OAuthCallbackRequest>,
) -> Result<Response, HttpAppError> {
    callback(&state, request).await
}

/// OAuth callback with the token fields in a JSON body
#[utoipa::path(
    post,
    path = "/api/v0/oauth/callback",
    tag = "oauth",
    request_body = OAuthCallbackRequest,
    responses(
        (status = 200, description = "User stored, or authorization declined (status ErrOK)", body = OAuthCallbackResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 502, description = "Profile API failure", body = ErrorResponse),
        (status = 500, description = "User table failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn callback_json(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<OAuthCallbackRequest>,
) -> Result<Response, HttpAppError> {
    callback(&state, request).await
}

async fn callback(state: &AppState, request: OAuthCallbackRequest) -> Result<Response, HttpAppError> {
    let response = state.oauth.handle_callback(&request).await?;

    if response.cookie.is_empty() {
        return Ok(Json(response).into_response());
    }

    let cookie = response.cookie.clone();
    Ok(([(SET_COOKIE, cookie)], Json(response)).into_response())
}
