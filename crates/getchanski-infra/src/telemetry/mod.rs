//! Telemetry initialization
//!
//! Only plain `tracing` output is supported; the subscriber is configured from
//! `RUST_LOG` with a per-service default filter.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry, TelemetryFormat};
