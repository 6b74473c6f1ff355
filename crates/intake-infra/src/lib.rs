//! Intake Infrastructure Library
//!
//! Shared infrastructure used by the upload API and the registration form:
//! - Middleware (request ID)
//! - Tracing initialization
//! - HTTP error body shape
//! - Lead webhook delivery

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod error;

#[cfg(feature = "webhook")]
pub mod webhook;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};

#[cfg(feature = "observability-basic")]
pub use telemetry::init_telemetry;

pub use error::ErrorResponse;

#[cfg(feature = "webhook")]
pub use webhook::{sign_payload, LeadWebhook, LeadWebhookConfig};
