use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Queue message envelope.
///
/// Serialized as `{"URL": "..."}`; the lowercase key is accepted on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMessage {
    #[serde(rename = "URL", alias = "url")]
    pub url: String,
}

impl UrlMessage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnqueueUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnqueueUrlResponse {
    pub status: String,
    pub message_id: Option<String>,
}
