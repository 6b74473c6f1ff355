//! Intake Core Library
//!
//! This crate provides the domain models, error types, configuration, and port
//! traits shared by the upload API, the upload client, and the registration form.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, IntakeConfig, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Lead, SelectedFile, SideTag, UploadResponse};
pub use ports::{ImageUploader, LeadSink};
pub use storage_types::StorageBackend;
