use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Profile returned by the OAuth provider's user API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub country: String,
}

/// Persisted user record, one per successful OAuth callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uuid: Uuid,
    pub user_id: String,
    pub login: String,
    pub country: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a record with a freshly generated identifier.
    ///
    /// `expires_at` comes from [`token_expiry`].
    pub fn new(profile: &UserProfile, token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            user_id: profile.uid.clone(),
            login: profile.login.clone(),
            country: profile.country.clone(),
            token: token.to_string(),
            expires_at,
        }
    }

    pub fn session_cookie(&self, domain: &str) -> String {
        session_cookie(self.uuid, domain, self.expires_at)
    }
}

/// `now + expires_in_secs`, for a positive lifetime that stays in range.
pub fn token_expiry(now: DateTime<Utc>, expires_in_secs: i64) -> Result<DateTime<Utc>, AppError> {
    if expires_in_secs <= 0 {
        return Err(AppError::InvalidInput(format!(
            "expires_in must be positive, got {}",
            expires_in_secs
        )));
    }
    TimeDelta::try_seconds(expires_in_secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::InvalidInput(format!("expires_in is out of range: {}", expires_in_secs))
        })
}

/// Render the session cookie, `expires` in IMF-fixdate form.
pub fn session_cookie(uuid: Uuid, domain: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "uuid={}; domain={}; expires={}; HttpOnly;",
        uuid,
        domain,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}
