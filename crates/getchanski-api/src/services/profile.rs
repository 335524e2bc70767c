//! OAuth provider profile lookup

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::time::Duration;

use getchanski_core::models::UserProfile;
use getchanski_core::{AppError, OAuthConfig};

/// Resolves an access token to the profile of the user who granted it
#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, AppError>;
}

/// Body of the disk resource endpoint. Error fields sit next to `user`
/// instead of replacing it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DiskResponse {
    error: String,
    message: String,
    description: String,
    user: UserProfile,
}

/// Profile lookup through the Yandex Disk REST API
#[derive(Clone, Debug)]
pub struct YandexDiskClient {
    http: reqwest::Client,
    url: String,
}

impl YandexDiskClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn from_config(config: &OAuthConfig, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::new(http, config.profile_api_url.clone()))
    }
}

#[async_trait]
impl ProfileClient for YandexDiskClient {
    #[tracing::instrument(skip(self, access_token), fields(url = %self.url))]
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, AppError> {
        let response = self
            .http
            .get(&self.url)
            .header(AUTHORIZATION, format!("OAuth {}", access_token))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Profile API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read profile API response: {}", e)))?;

        // The status code is not consulted; the error fields of the body decide.
        let decoded: DiskResponse = serde_json::from_slice(&body).map_err(|e| {
            AppError::Upstream(format!(
                "Can't decode profile API response ({}): {}: {}",
                status,
                String::from_utf8_lossy(&body),
                e
            ))
        })?;

        if !decoded.error.is_empty() {
            return Err(AppError::Upstream(format!(
                "{}: {} ({})",
                decoded.error, decoded.message, decoded.description
            )));
        }

        tracing::debug!(login = %decoded.user.login, "Profile fetched");
        Ok(decoded.user)
    }
}
