//! Configuration module
//!
//! Configuration is read once at process start from the environment (after
//! loading an optional `.env` file) and then passed around by value. Nothing in
//! the workspace reads the environment after startup.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_UPLOAD_SIZE_MB: usize = 10;
const LOCAL_STORAGE_PATH: &str = "./uploads";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Server-wide settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Upload, storage, and lead delivery settings
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, R2, etc.)
    pub s3_public_base_url: Option<String>,
    pub aws_region: Option<String>,
    pub max_upload_size_bytes: usize,
    // Lead delivery
    pub lead_webhook_url: Option<String>,
    pub webhook_timeout_seconds: Option<u64>,
    pub webhook_signing_secret: Option<String>,
    pub upload_api_url: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IntakeConfig>);

impl Config {
    fn as_intake(&self) -> &IntakeConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_intake().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = IntakeConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_intake().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_intake().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_intake().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_intake().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_intake().storage_backend
    }

    pub fn local_storage_path(&self) -> &str {
        &self.as_intake().local_storage_path
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.as_intake().local_storage_base_url
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_intake().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_intake().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_intake().s3_endpoint.as_deref()
    }

    pub fn s3_public_base_url(&self) -> Option<&str> {
        self.as_intake().s3_public_base_url.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_intake().aws_region.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_intake().max_upload_size_bytes
    }

    pub fn lead_webhook_url(&self) -> Option<&str> {
        self.as_intake().lead_webhook_url.as_deref()
    }

    pub fn webhook_timeout_seconds(&self) -> Option<u64> {
        self.as_intake().webhook_timeout_seconds
    }

    pub fn webhook_signing_secret(&self) -> Option<&str> {
        self.as_intake().webhook_signing_secret.as_deref()
    }

    pub fn upload_api_url(&self) -> &str {
        &self.as_intake().upload_api_url
    }
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => LogFormat::Compact,
        };

        let base = BaseConfig {
            server_port,
            cors_origins,
            environment,
            log_format,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::Local,
        };

        let max_upload_size_mb: usize = match var("MAX_UPLOAD_SIZE_MB") {
            Some(mb) => mb
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?,
            None => MAX_UPLOAD_SIZE_MB,
        };
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))?;

        let webhook_timeout_seconds = match var("WEBHOOK_TIMEOUT_SECS") {
            Some(secs) => Some(
                secs.trim()
                    .parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("WEBHOOK_TIMEOUT_SECS must be a valid number"))?,
            ),
            None => None,
        };

        Ok(IntakeConfig {
            storage_backend,
            local_storage_path: var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}/files", server_port)),
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION"),
            s3_endpoint: var("S3_ENDPOINT"),
            s3_public_base_url: var("S3_PUBLIC_BASE_URL"),
            aws_region: var("AWS_REGION"),
            max_upload_size_bytes,
            lead_webhook_url: var("LEAD_WEBHOOK_URL"),
            webhook_timeout_seconds,
            webhook_signing_secret: var("WEBHOOK_SIGNING_SECRET"),
            upload_api_url: var("UPLOAD_API_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
            base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        IntakeConfig::from_lookup(|key| vars.get(key).cloned()).map(|c| Config(Box::new(c)))
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 4000);
        assert_eq!(config.storage_backend(), StorageBackend::Local);
        assert_eq!(config.local_storage_path(), "./uploads");
        assert_eq!(config.local_storage_base_url(), "http://localhost:4000/files");
        assert_eq!(config.upload_api_url(), "http://localhost:4000");
        assert_eq!(config.max_upload_size_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.cors_origins(), &["*".to_string()]);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.lead_webhook_url().is_none());
        assert!(config.webhook_timeout_seconds().is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn reads_webhook_and_storage_settings() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("STORAGE_BACKEND", "s3"),
            ("S3_BUCKET", "ids"),
            ("AWS_REGION", "eu-west-1"),
            ("LEAD_WEBHOOK_URL", "https://hooks.example.com/lead"),
            ("WEBHOOK_TIMEOUT_SECS", "15"),
            ("MAX_UPLOAD_SIZE_MB", "4"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.storage_backend(), StorageBackend::S3);
        assert_eq!(config.s3_bucket(), Some("ids"));
        assert_eq!(config.aws_region(), Some("eu-west-1"));
        assert_eq!(
            config.lead_webhook_url(),
            Some("https://hooks.example.com/lead")
        );
        assert_eq!(config.webhook_timeout_seconds(), Some(15));
        assert_eq!(config.max_upload_size_bytes(), 4 * 1024 * 1024);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.upload_api_url(), "http://localhost:8080");
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let err = config_from(&[("ENVIRONMENT", "production")]).unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));

        let config = config_from(&[
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.cors_origins().len(), 2);
    }

    #[test]
    fn rejects_invalid_numbers() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("WEBHOOK_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "nfs")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "ten")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "-1")]).is_err());
    }

    #[test]
    fn rejects_upload_limit_that_overflows() {
        let huge = usize::MAX.to_string();
        let err = config_from(&[("MAX_UPLOAD_SIZE_MB", huge.as_str())]).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
