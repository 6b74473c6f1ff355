use anyhow::{Context, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use intake_core::{Lead, LeadSink};
use reqwest::Client;
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

const USER_AGENT: &str = "Intake-Lead-Webhook/1.0";
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Configuration for lead webhook delivery
#[derive(Clone, Debug)]
pub struct LeadWebhookConfig {
    pub url: String,
    /// No timeout is applied when `None`
    pub timeout_seconds: Option<u64>,
    /// When set, bodies are signed with HMAC-SHA256
    pub signing_secret: Option<String>,
}

impl LeadWebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_seconds: None,
            signing_secret: None,
        }
    }
}

/// Posts submitted leads as JSON to a single webhook URL.
///
/// One attempt per lead. Any transport failure or non-2xx status is returned
/// as an error; the caller decides whether that matters.
#[derive(Clone)]
pub struct LeadWebhook {
    http_client: Client,
    config: LeadWebhookConfig,
}

impl LeadWebhook {
    pub fn new(config: LeadWebhookConfig) -> Result<Self> {
        let mut builder = Client::builder().pool_idle_timeout(Duration::from_secs(90));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .context("Failed to create HTTP client for lead webhook")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    #[tracing::instrument(skip(self, lead), fields(url = %self.config.url))]
    async fn send(&self, lead: &Lead) -> Result<()> {
        let body = serde_json::to_string(lead).context("Failed to serialize lead")?;

        let mut request = self
            .http_client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT);

        if let Some(ref secret) = self.config.signing_secret {
            let signature = sign_payload(&body, secret)?;
            request = request.header(SIGNATURE_HEADER, format!("v1={}", signature));
        }

        let start = std::time::Instant::now();
        let response = request
            .body(body)
            .send()
            .await
            .context("Failed to send lead webhook request")?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                status_code = status.as_u16(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Lead webhook delivered"
            );
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Lead webhook returned non-2xx status: {} - {}",
                status.as_u16(),
                body
            )
        }
    }
}

#[async_trait]
impl LeadSink for LeadWebhook {
    async fn deliver(&self, lead: &Lead) -> Result<()> {
        self.send(lead).await
    }
}

/// Sign a webhook body with HMAC-SHA256, hex encoded.
pub fn sign_payload(body: &str, secret: &str) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).context("Invalid signing secret")?;
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
