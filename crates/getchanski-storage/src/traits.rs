//! Storage abstraction trait

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for getchanski_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => getchanski_core::AppError::Config(msg),
            other => getchanski_core::AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// The worker only ever writes whole objects; there is no multipart upload.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a local file under `storage_key` and return its URL.
    async fn upload_file(&self, storage_key: &str, path: &Path) -> StorageResult<String>;

    /// Upload an in-memory buffer under `storage_key` and return its URL.
    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete a file by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
