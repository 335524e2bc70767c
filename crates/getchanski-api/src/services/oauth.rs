//! OAuth callback handling: profile lookup, user record, session cookie

use chrono::Utc;
use std::sync::Arc;

use getchanski_core::constants::{STATUS_ERR_OK, STATUS_OK};
use getchanski_core::models::{
    token_expiry, OAuthCallbackRequest, OAuthCallbackResponse, UserRecord,
};
use getchanski_core::AppError;
use getchanski_db::UserRepository;

use super::profile::ProfileClient;

#[derive(Clone)]
pub struct OAuthService {
    profiles: Arc<dyn ProfileClient>,
    users: Arc<dyn UserRepository>,
    cookie_domain: String,
}

impl OAuthService {
    pub fn new(
        profiles: Arc<dyn ProfileClient>,
        users: Arc<dyn UserRepository>,
        cookie_domain: impl Into<String>,
    ) -> Self {
        Self {
            profiles,
            users,
            cookie_domain: cookie_domain.into(),
        }
    }

    /// Exchange the callback parameters for a stored user and a session cookie.
    ///
    /// A declined authorization is an expected outcome: it yields the neutral
    /// status without contacting the profile API or writing anything.
    #[tracing::instrument(skip(self, request), fields(declined = request.is_declined()))]
    pub async fn handle_callback(
        &self,
        request: &OAuthCallbackRequest,
    ) -> Result<OAuthCallbackResponse, AppError> {
        if request.is_declined() {
            tracing::warn!(
                error = %request.error,
                error_description = %request.error_description,
                "Authorization declined by the provider"
            );
            return Ok(OAuthCallbackResponse {
                status: STATUS_ERR_OK.to_string(),
                uuid: String::new(),
                cookie: String::new(),
            });
        }

        // Reject a bad lifetime before the token reaches the profile API.
        let expires_at = token_expiry(Utc::now(), request.expires_in)?;

        let profile = self.profiles.fetch_profile(&request.access_token).await?;

        let record = UserRecord::new(&profile, &request.access_token, expires_at);
        self.users.put_user(&record).await?;

        tracing::info!(
            uuid = %record.uuid,
            login = %record.login,
            country = %record.country,
            expires_at = %record.expires_at,
            "User signed in"
        );

        Ok(OAuthCallbackResponse {
            status: STATUS_OK.to_string(),
            uuid: record.uuid.to_string(),
            cookie: record.session_cookie(&self.cookie_domain),
        })
    }
}
