//! Domain models shared by the API, the worker and the CLI.

pub mod media;
pub mod message;
pub mod oauth;
pub mod user;

pub use media::MediaInfo;
pub use message::{EnqueueUrlRequest, EnqueueUrlResponse, UrlMessage};
pub use oauth::{OAuthCallbackRequest, OAuthCallbackResponse, RedirectResponse};
pub use user::{session_cookie, token_expiry, UserProfile, UserRecord};
