//! API constants

/// Versioned prefix of every API route.
pub const API_PREFIX: &str = "/api/v0";

/// Upper bound for request bodies; every endpoint takes a small JSON document.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// In-flight request cap for the whole router.
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Timeout of calls to the OAuth profile API.
pub const PROFILE_API_TIMEOUT_SECS: u64 = 10;

pub const SERVICE_NAME: &str = "getchanski-api";
