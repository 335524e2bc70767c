//! Getchanski Core Library
//!
//! This crate provides core domain models, error types and configuration
//! that are shared across all Getchanski components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, OAuthConfig, QueueConfig, StorageConfig, WorkerConfig, WorkerMode};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
