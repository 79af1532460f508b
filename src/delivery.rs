//! Outbound notification delivery.
//!
//! Handlers only see the [`EmailSender`] trait; which implementation is used
//! is decided at startup from configuration. Each notification is attempted
//! once.

use crate::notification::Notification;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::fmt;
use std::time::Duration;

/// Acknowledgment returned by a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAck {
    /// Provider-side message id, when the provider returns one.
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The request never got a response (DNS, TLS, timeout...).
    Transport(String),
    /// The provider answered with a non-success status.
    Rejected { status: u16, body: String },
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Transport(msg) => write!(f, "Mail API request failed: {}", msg),
            DeliveryError::Rejected { status, body } => {
                write!(f, "Mail API returned {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for DeliveryError {}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Transport(err.to_string())
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<DeliveryAck, DeliveryError>;
}

/// Sender used when no mail provider is configured: logs and succeeds.
#[derive(Debug, Clone, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, notification: &Notification) -> Result<DeliveryAck, DeliveryError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Email would be sent (no mail provider configured)"
        );
        tracing::debug!("Email body:\n{}", notification.html);
        Ok(DeliveryAck { message_id: None })
    }
}

/// Sender for SendGrid-compatible HTTP mail APIs (`POST /v3/mail/send`).
#[derive(Clone)]
pub struct HttpEmailSender {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpEmailSender {
    /// Creates a new `HttpEmailSender`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root URL of the mail API, without the `/v3/...` path.
    /// * `api_key` - Bearer token for the mail API.
    pub fn new(base_url: String, api_key: String) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn payload(notification: &Notification) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": notification.to }] }],
            "from": { "email": notification.from },
            "subject": notification.subject,
            "content": [{ "type": "text/html", "value": notification.html }],
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, notification: &Notification) -> Result<DeliveryAck, DeliveryError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        tracing::info!("Sending notification '{}' via {}", notification.subject, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&Self::payload(notification))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Mail API returned error {}: {}", status, body);
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        tracing::info!("Notification accepted by mail API (id: {:?})", message_id);
        Ok(DeliveryAck { message_id })
    }
}
