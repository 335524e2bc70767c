//! Getchanski Storage Library
//!
//! Storage abstraction for uploaded artifacts. The `Storage` trait is backed by
//! `object_store`, so the same implementation serves S3, a local directory and
//! an in-memory store.
//!
//! # Storage key format
//!
//! Artifacts are stored at the bucket root as `{title}.{ext}`. Key derivation is
//! centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod object;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use getchanski_core::StorageBackend;
pub use keys::artifact_key;
pub use object::ObjectStorage;
pub use traits::{Storage, StorageError, StorageResult};
