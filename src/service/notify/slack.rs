//! Slack incoming-webhook delivery.
//!
//! Posts the message JSON to the configured webhook URL. One attempt per
//! message, bounded by the configured timeout; the response body is
//! discarded.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::base::{
    config::Config,
    types::{OutboundMessage, Res, Void},
};

use super::{GenericNotifyClient, NotifyClient};

// Extra methods on `NotifyClient` applied by the slack implementation.

impl NotifyClient {
    /// Creates a new Slack incoming-webhook client.
    pub fn slack(config: &Config) -> Res<Self> {
        Ok(SlackWebhookClient::new(config)?.into())
    }
}

impl From<SlackWebhookClient> for NotifyClient {
    fn from(client: SlackWebhookClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Slack incoming-webhook client.
#[derive(Clone)]
pub struct SlackWebhookClient {
    client: reqwest::Client,
    webhook_url: reqwest::Url,
}

impl SlackWebhookClient {
    /// Create a new client posting to `SLACK_WEBHOOK_URL`.
    #[instrument(name = "SlackWebhookClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let webhook_url = reqwest::Url::parse(&config.slack_webhook_url).context("Slack webhook URL is invalid")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.slack_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, webhook_url })
    }
}

#[async_trait]
impl GenericNotifyClient for SlackWebhookClient {
    #[instrument(skip_all, fields(channel = %message.channel))]
    async fn send_message(&self, message: &OutboundMessage) -> Void {
        // `.json()` sets `Content-Type: application/json`.
        let response = self.client.post(self.webhook_url.clone()).json(message).send().await.map_err(|e| {
            error!("Slack webhook request failed: {}", e);
            anyhow::anyhow!("Failed to send message: {}", e)
        })?;

        let status = response.status();

        if !status.is_success() {
            error!("Slack webhook responded with {}", status);
            return Err(anyhow::anyhow!("Slack webhook responded with {}", status));
        }

        info!("Delivered notification.");

        Ok(())
    }
}
