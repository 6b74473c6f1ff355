//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Options for a single `store` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    /// MIME type recorded with the object
    pub content_type: String,
    /// Object must be readable without credentials
    pub public: bool,
    /// Append a random suffix to the key before the extension
    pub add_random_suffix: bool,
}

impl PutOptions {
    /// Public object with a random suffix, as used for uploaded ID images.
    pub fn public_unique(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            public: true,
            add_random_suffix: true,
        }
    }
}

/// Location of a stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Publicly reachable URL
    pub url: String,
    /// Final key inside the store, including any random suffix
    pub pathname: String,
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait so
/// the upload endpoint never depends on a specific provider.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `key` and return where it ended up.
    ///
    /// Fails with `StorageError` on any provider failure; callers do not retry.
    async fn store(&self, key: &str, data: Bytes, options: &PutOptions)
        -> StorageResult<StoredObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
