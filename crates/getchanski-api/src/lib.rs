//! Getchanski API Library
//!
//! HTTP handlers for URL submission and the OAuth redirect/callback pair,
//! plus the application setup shared by the binary and the tests.

mod api_doc;
pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use getchanski_infra::ErrorResponse;
pub use state::AppState;
