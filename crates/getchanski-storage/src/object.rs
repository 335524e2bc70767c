use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::path::Path;
use std::sync::Arc;

/// `Storage` implementation over any `object_store` backend
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    backend: StorageBackend,
    bucket: String,
    /// Prefix joined with the key to build public URLs.
    url_base: String,
}

impl ObjectStorage {
    /// Create an S3-backed storage
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:4566" for localstack)
    pub fn s3(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        // Path-style URLs for S3-compatible providers, virtual-hosted style for AWS.
        let url_base = match endpoint_url {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
        };

        Ok(Self {
            store: Arc::new(store),
            backend: StorageBackend::S3,
            bucket,
            url_base,
        })
    }

    /// Create a storage rooted at a local directory (created if missing)
    pub fn local(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;
        let store = LocalFileSystem::new_with_prefix(root)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self {
            store: Arc::new(store),
            backend: StorageBackend::Local,
            bucket: root.display().to_string(),
            url_base: format!("file://{}", root.display()),
        })
    }

    /// Create a process-local in-memory storage
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            backend: StorageBackend::Memory,
            bucket: "memory".to_string(),
            url_base: "memory://".to_string(),
        }
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.url_base, key)
    }

    /// Object location for a key, taken verbatim.
    ///
    /// `ObjectPath::from` would percent-encode characters such as `[`, `%` or `#`
    /// that are common in titles.
    fn location(storage_key: &str) -> StorageResult<ObjectPath> {
        ObjectPath::parse(storage_key)
            .map_err(|e| StorageError::InvalidKey(format!("{}: {}", storage_key, e)))
    }

    async fn put(&self, storage_key: &str, bytes: Bytes) -> StorageResult<String> {
        let size = bytes.len() as u64;
        let location = Self::location(storage_key)?;
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(bytes)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(url)
    }
}

#[async_trait]
impl Storage for ObjectStorage {
    async fn upload_file(&self, storage_key: &str, path: &Path) -> StorageResult<String> {
        // Artifacts are single audio files; they are read whole and sent in one put.
        let data = tokio::fs::read(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.upload_with_key(storage_key, data).await
    }

    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String> {
        self.put(storage_key, Bytes::from(data)).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Self::location(storage_key)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let location = Self::location(storage_key)?;

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                "Object delete failed"
            );
            StorageError::DeleteFailed(e.to_string())
        })?;

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}
