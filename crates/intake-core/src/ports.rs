//! Ports used by the registration form
//!
//! The form only talks to the outside world through these traits so that the
//! upload API client and the webhook relay can be swapped for test doubles.

use async_trait::async_trait;

use crate::models::{Lead, SelectedFile, SideTag, UploadResponse};

/// Sends one selected image to the upload endpoint.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload `file` tagged with `side`, returning the stored object's URL.
    async fn upload(&self, side: SideTag, file: SelectedFile) -> anyhow::Result<UploadResponse>;
}

/// Receives finished leads.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Deliver a lead. Callers treat failures as non-fatal.
    async fn deliver(&self, lead: &Lead) -> anyhow::Result<()>;
}
