//! Wiring the form to the configured upload API and lead webhook.

use anyhow::{anyhow, Context, Result};
use intake_api_client::UploadClient;
use intake_core::{Config, LeadSink};
use intake_infra::{LeadWebhook, LeadWebhookConfig};
use std::sync::Arc;

use crate::form::RegistrationForm;

/// Build the lead sink from configuration.
///
/// `LEAD_WEBHOOK_URL` is required; without it there is nowhere to send leads.
pub fn create_lead_sink(config: &Config) -> Result<Arc<dyn LeadSink>> {
    let url = config
        .lead_webhook_url()
        .ok_or_else(|| anyhow!("LEAD_WEBHOOK_URL must be set"))?;

    let webhook = LeadWebhook::new(LeadWebhookConfig {
        url: url.to_string(),
        timeout_seconds: config.webhook_timeout_seconds(),
        signing_secret: config.webhook_signing_secret().map(String::from),
    })
    .context("Failed to create lead webhook")?;
    tracing::info!(
        url = %webhook.url(),
        timeout_seconds = ?config.webhook_timeout_seconds(),
        signed = config.webhook_signing_secret().is_some(),
        "Lead webhook configured"
    );
    Ok(Arc::new(webhook))
}

/// Build a form that uploads to `UPLOAD_API_URL` and delivers leads to `LEAD_WEBHOOK_URL`.
pub fn build_form(config: &Config) -> Result<RegistrationForm> {
    let uploader =
        UploadClient::new(config.upload_api_url()).context("Failed to create upload client")?;
    let sink = create_lead_sink(config)?;
    Ok(RegistrationForm::new(Arc::new(uploader), sink))
}
