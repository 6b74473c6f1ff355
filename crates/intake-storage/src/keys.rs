//! Shared key generation for storage backends.
//!
//! Key format: `id-{side}-{unixMillis}-{filename}`, optionally followed by a
//! random suffix inserted before the file extension.

use crate::traits::{PutOptions, StorageError, StorageResult};
use intake_core::SideTag;
use rand::{distr::Alphanumeric, Rng};

const MAX_FILENAME_LENGTH: usize = 200;
const RANDOM_SUFFIX_LENGTH: usize = 16;

/// Build the key for an uploaded identity image.
pub fn upload_key(side: SideTag, timestamp_millis: i64, original_filename: &str) -> String {
    format!(
        "id-{}-{}-{}",
        side,
        timestamp_millis,
        sanitize_filename(original_filename)
    )
}

/// Reduce a client-supplied filename to a safe single path segment.
///
/// Only the final path component is kept and anything outside
/// `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.replace("..", "_");
    if sanitized.trim_matches(|c| c == '.' || c == '_').is_empty() {
        return "file".to_string();
    }

    sanitized
}

/// Insert `-{random}` before the extension of the last path segment.
pub fn with_random_suffix(key: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LENGTH)
        .map(char::from)
        .collect();

    let segment_start = key.rfind('/').map(|i| i + 1).unwrap_or(0);
    match key[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let split = segment_start + dot;
            format!("{}-{}{}", &key[..split], suffix, &key[split..])
        }
        _ => format!("{}-{}", key, suffix),
    }
}

/// Reject keys that could escape the store's namespace.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate `key` and apply the options' suffix policy, returning the final pathname.
pub fn resolve_key(key: &str, options: &PutOptions) -> StorageResult<String> {
    validate_key(key)?;
    if options.add_random_suffix {
        Ok(with_random_suffix(key))
    } else {
        Ok(key.to_string())
    }
}
