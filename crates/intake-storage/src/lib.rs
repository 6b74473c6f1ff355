//! Intake Storage Library
//!
//! This crate provides the storage port used by the upload endpoint and its
//! implementations for S3-compatible object stores and the local filesystem.
//!
//! # Storage key format
//!
//! Uploaded identity images are stored under `id-{side}-{unixMillis}-{filename}`.
//! Backends append a random suffix before the extension when asked to, so two
//! uploads of the same file never collide. Keys must not contain `..` or a
//! leading `/`. Key generation lives in the `keys` module so all backends stay
//! consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use intake_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{PutOptions, Storage, StorageError, StorageResult, StoredObject};
