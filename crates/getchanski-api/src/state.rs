use getchanski_core::OAuthConfig;
use getchanski_worker::UrlQueue;

use crate::services::OAuthService;

/// Shared handler state; every external client sits behind a trait object.
#[derive(Clone)]
pub struct AppState {
    pub urls: UrlQueue,
    pub oauth: OAuthService,
    pub oauth_config: OAuthConfig,
}

impl AppState {
    pub fn new(urls: UrlQueue, oauth: OAuthService, oauth_config: OAuthConfig) -> Self {
        Self {
            urls,
            oauth,
            oauth_config,
        }
    }
}
