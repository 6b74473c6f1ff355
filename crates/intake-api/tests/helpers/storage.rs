use async_trait::async_trait;
use bytes::Bytes;
use intake_core::StorageBackend;
use intake_storage::{PutOptions, Storage, StorageError, StorageResult, StoredObject};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test storage configuration.
pub struct TestStorage {
    pub temp_dir: TempDir,
    pub base_path: PathBuf,
    pub base_url: String,
}

impl TestStorage {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let base_path = temp_dir.path().to_path_buf();
        let base_url = "http://localhost:4000/files".to_string();
        Self {
            temp_dir,
            base_path,
            base_url,
        }
    }

    pub fn base_path_str(&self) -> String {
        self.base_path.to_string_lossy().to_string()
    }

    pub fn stored_file(&self, pathname: &str) -> Vec<u8> {
        std::fs::read(self.base_path.join(pathname)).expect("Stored file missing")
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage double that fails like an unreachable provider.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn store(
        &self,
        _key: &str,
        _data: Bytes,
        _options: &PutOptions,
    ) -> StorageResult<StoredObject> {
        Err(StorageError::UploadFailed(
            "connection refused (provider detail)".to_string(),
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
