use crate::adapters::ensure_success;
use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Posts `{ to, subject, content }` to the e-mail dispatch endpoint.
///
/// Without an endpoint every send fails with a missing-configuration error,
/// so forms that never notify can run without one.
pub struct HttpNotifier {
    endpoint: Option<Url>,
    client: Client,
}

impl HttpNotifier {
    pub fn new(endpoint: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint
            .map(|raw| {
                Url::parse(raw).map_err(|e| IntakeError::InvalidConfigValueError {
                    field: "notifications.endpoint".to_string(),
                    value: raw.to_string(),
                    reason: format!("Invalid URL format: {}", e),
                })
            })
            .transpose()?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint,
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or_else(|| IntakeError::MissingConfigError {
                field: "notifications.endpoint".to_string(),
            })?;

        tracing::debug!("📧 Sending '{}' to {}", notification.subject, notification.to);
        let response = self
            .client
            .post(endpoint)
            .json(notification)
            .send()
            .await?;
        ensure_success(response).await
    }
}
