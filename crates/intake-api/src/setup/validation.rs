//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use super::routes::request_body_limit;
use anyhow::Result;
use intake_core::{Config, StorageBackend};

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.max_upload_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max upload size cannot be 0"));
    }
    request_body_limit(config)?;

    if config.storage_backend() == StorageBackend::S3 {
        if config.s3_bucket().is_none() {
            return Err(anyhow::anyhow!(
                "S3_BUCKET must be set when using the S3 storage backend"
            ));
        }
        if config.s3_region().or(config.aws_region()).is_none() {
            return Err(anyhow::anyhow!(
                "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
            ));
        }
    }

    if let Some(url) = config.lead_webhook_url() {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "LEAD_WEBHOOK_URL must be an http(s) URL"
            ));
        }
    }

    Ok(())
}
