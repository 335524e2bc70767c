use crate::{ObjectStorage, Storage, StorageBackend, StorageError, StorageResult};
use getchanski_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = &config.storage;

    match storage.backend {
        StorageBackend::S3 => {
            let endpoint = storage
                .endpoint
                .clone()
                .or_else(|| config.aws_endpoint_url.clone());
            let s3 = ObjectStorage::s3(storage.bucket.clone(), config.aws_region.clone(), endpoint)?;
            Ok(Arc::new(s3))
        }

        StorageBackend::Local => {
            let base_path = storage.local_path.as_deref().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            Ok(Arc::new(ObjectStorage::local(base_path)?))
        }

        StorageBackend::Memory => {
            tracing::warn!("In-memory storage selected, uploads are lost on exit");
            Ok(Arc::new(ObjectStorage::in_memory()))
        }
    }
}
