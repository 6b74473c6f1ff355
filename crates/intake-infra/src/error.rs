//! HTTP error body
//!
//! The `IntoResponse` implementation for `AppError` lives in the API crate
//! because of the orphan rule; this crate only owns the wire shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_single_error_field() {
        let body = serde_json::to_value(ErrorResponse::new("No file provided")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No file provided" }));
    }
}
