//! Getchanski Infrastructure Library
//!
//! Shared infrastructure used by every Getchanski binary:
//! - Telemetry initialization (tracing subscriber)
//! - Shutdown signal handling
//! - HTTP error body

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "observability-basic")]
pub mod shutdown;

pub mod error;

#[cfg(feature = "observability-basic")]
pub use shutdown::shutdown_signal;
#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry, TelemetryFormat};

pub use error::ErrorResponse;
