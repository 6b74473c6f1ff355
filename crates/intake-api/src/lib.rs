//! Intake API Library
//!
//! This crate provides the upload endpoint, its middleware stack, and
//! application setup.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use api_doc::get_openapi_spec;
pub use error::HttpAppError;
pub use intake_infra::ErrorResponse;
