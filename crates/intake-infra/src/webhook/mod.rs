//! Lead delivery over HTTP

mod service;

pub use service::{sign_payload, LeadWebhook, LeadWebhookConfig};
