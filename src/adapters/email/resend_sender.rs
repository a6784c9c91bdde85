//! Resend implementation of NotificationSender.
//!
//! Sends the ticket confirmation email through Resend's HTTP API. The email
//! carries the event details and the credential string the holder presents
//! at the gate.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{NotificationError, NotificationSender, TicketConfirmation};

/// Configuration for the Resend sender.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Sender address (e.g. "Fantasia <tickets@fantasia.example>").
    pub from: String,
    /// Base URL for the API (default: https://api.resend.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ResendConfig {
    /// Creates a new configuration with the given API key and sender.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Resend API implementation of the NotificationSender port.
pub struct ResendSender {
    config: ResendConfig,
    client: Client,
}

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

impl ResendSender {
    /// Creates a new Resend sender with the given configuration.
    pub fn new(config: ResendConfig) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotificationError::Unavailable(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url)
    }

    fn render_html(confirmation: &TicketConfirmation) -> String {
        let greeting = confirmation
            .recipient_name
            .as_deref()
            .unwrap_or("there");
        format!(
            r#"<h1>Votre billet pour {title}</h1>
<p>Bonjour {greeting},</p>
<p>Votre billet pour <strong>{title}</strong> ({location}, {date}) est confirmé.</p>
<p>Présentez ce code à l'entrée :</p>
<pre>{credential}</pre>"#,
            title = confirmation.event.title,
            location = confirmation.event.location,
            date = confirmation.event.date,
            greeting = greeting,
            credential = confirmation.ticket.credential,
        )
    }
}

#[async_trait]
impl NotificationSender for ResendSender {
    async fn send_confirmation(
        &self,
        confirmation: &TicketConfirmation,
    ) -> Result<(), NotificationError> {
        let request = SendEmailRequest {
            from: self.config.from.clone(),
            to: vec![confirmation.recipient_email.clone()],
            subject: format!("Votre billet - {}", confirmation.event.title),
            html: Self::render_html(confirmation),
        };

        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected(format!(
                "status {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
