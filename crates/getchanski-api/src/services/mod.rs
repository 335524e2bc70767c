//! Services behind the OAuth handlers

pub mod oauth;
pub mod profile;

pub use oauth::OAuthService;
pub use profile::{ProfileClient, YandexDiskClient};
