use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Parameters handed back by the OAuth provider (implicit grant).
///
/// Either `access_token` or `error` is populated. The PascalCase names used by
/// the site's callback page are accepted as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct OAuthCallbackRequest {
    #[serde(alias = "AccessToken")]
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(alias = "ExpiresIn")]
    pub expires_in: i64,
    #[serde(alias = "TokenType")]
    pub token_type: String,
    #[serde(alias = "Error")]
    pub error: String,
    #[serde(alias = "ErrorDescription")]
    pub error_description: String,
}

impl OAuthCallbackRequest {
    pub fn is_declined(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OAuthCallbackResponse {
    pub status: String,
    pub uuid: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub cookie: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RedirectResponse {
    pub redirect_url: String,
}
